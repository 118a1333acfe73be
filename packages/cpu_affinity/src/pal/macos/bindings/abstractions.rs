use std::fmt::Debug;
use std::io;

use libc::{c_long, integer_t, kern_return_t, pid_t};

/// Bindings for FFI calls into external libraries (either provided by operating system or not).
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
///
/// The Mach thread policy calls speak `kern_return_t`, not errno, so those two surface the
/// raw kernel status instead of an `io::Error`.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    // thread_policy_get(THREAD_AFFINITY_POLICY) for the current thread
    fn thread_affinity_tag_current(&self) -> Result<integer_t, kern_return_t>;

    // thread_policy_set(THREAD_AFFINITY_POLICY) for the current thread
    fn set_thread_affinity_tag_current(&self, tag: integer_t) -> Result<(), kern_return_t>;

    fn getpid(&self) -> pid_t;

    // pthread_threadid_np() for the current thread
    fn thread_id_current(&self) -> Result<u64, io::Error>;

    // sysconf(_SC_NPROCESSORS_ONLN)
    fn nprocessors_online(&self) -> Result<c_long, io::Error>;
}
