use std::fmt::Debug;
use std::io;

use libc::{c_long, cpu_set_t, pid_t};

/// Bindings for FFI calls into external libraries (either provided by operating system or not).
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    // sched_getaffinity() for the current thread
    fn sched_getaffinity_current(&self) -> Result<cpu_set_t, io::Error>;

    // sched_setaffinity() for the current thread
    fn sched_setaffinity_current(&self, cpuset: &cpu_set_t) -> Result<(), io::Error>;

    fn sched_getcpu(&self) -> i32;

    fn getpid(&self) -> pid_t;

    // gettid() has no libc wrapper on older glibc, so this goes through syscall(2).
    fn gettid(&self) -> pid_t;

    // sysconf(_SC_NPROCESSORS_ONLN)
    fn nprocessors_online(&self) -> Result<c_long, io::Error>;
}
