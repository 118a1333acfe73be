use std::{io, mem};

use libc::{c_long, cpu_set_t, pid_t};

use crate::pal::linux::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

impl Bindings for BuildTargetBindings {
    fn sched_getaffinity_current(&self) -> Result<cpu_set_t, io::Error> {
        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: cpu_set_t = unsafe { mem::zeroed() };

        // 0 means current thread.
        // SAFETY: No safety requirements beyond passing valid arguments.
        let result = unsafe { libc::sched_getaffinity(0, size_of::<cpu_set_t>(), &raw mut cpuset) };

        if result == 0 {
            Ok(cpuset)
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn sched_setaffinity_current(&self, cpuset: &cpu_set_t) -> Result<(), io::Error> {
        // 0 means current thread.
        // SAFETY: No safety requirements beyond passing valid arguments.
        let result = unsafe { libc::sched_setaffinity(0, size_of::<cpu_set_t>(), cpuset) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn sched_getcpu(&self) -> i32 {
        // SAFETY: No safety requirements.
        unsafe { libc::sched_getcpu() }
    }

    fn getpid(&self) -> pid_t {
        // SAFETY: No safety requirements; getpid never fails.
        unsafe { libc::getpid() }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the kernel returns a pid_t from gettid; the wide syscall return type is incidental"
    )]
    fn gettid(&self) -> pid_t {
        // There is no glibc wrapper we can rely on across the versions we support.
        // SAFETY: SYS_gettid takes no arguments and never fails.
        let tid = unsafe { libc::syscall(libc::SYS_gettid) };

        tid as pid_t
    }

    fn nprocessors_online(&self) -> Result<c_long, io::Error> {
        // SAFETY: No safety requirements beyond passing a valid sysconf name.
        let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };

        if count > 0 {
            Ok(count)
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
