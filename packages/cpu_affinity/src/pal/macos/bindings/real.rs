use std::io;

use libc::{
    KERN_SUCCESS, THREAD_AFFINITY_POLICY, THREAD_AFFINITY_POLICY_COUNT, boolean_t, c_long,
    integer_t, kern_return_t, mach_msg_type_number_t, pid_t, pthread_mach_thread_np, pthread_self,
    thread_policy_flavor_t, thread_policy_t, thread_t,
};

use crate::pal::macos::Bindings;

/// Mirrors the Mach header type of the same name. One `integer_t` holding the affinity tag.
#[repr(C)]
#[expect(non_camel_case_types, reason = "matches the Mach header name")]
struct thread_affinity_policy_data_t {
    affinity_tag: integer_t,
}

// libc exposes the Mach thread policy types and constants but not these two functions.
#[link(name = "System", kind = "framework")]
unsafe extern "C" {
    fn thread_policy_get(
        thread: thread_t,
        flavor: thread_policy_flavor_t,
        policy_info: thread_policy_t,
        count: *mut mach_msg_type_number_t,
        get_default: *mut boolean_t,
    ) -> kern_return_t;

    fn thread_policy_set(
        thread: thread_t,
        flavor: thread_policy_flavor_t,
        policy_info: thread_policy_t,
        count: mach_msg_type_number_t,
    ) -> kern_return_t;
}

#[expect(
    clippy::cast_sign_loss,
    reason = "the flavor constant is a small positive integer"
)]
const AFFINITY_FLAVOR: thread_policy_flavor_t = THREAD_AFFINITY_POLICY as thread_policy_flavor_t;

fn current_thread_port() -> thread_t {
    // SAFETY: No safety requirements.
    let self_thread = unsafe { pthread_self() };

    // SAFETY: `self_thread` is the valid handle of the calling thread.
    unsafe { pthread_mach_thread_np(self_thread) }
}

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

impl Bindings for BuildTargetBindings {
    fn thread_affinity_tag_current(&self) -> Result<integer_t, kern_return_t> {
        let port = current_thread_port();

        let mut policy = thread_affinity_policy_data_t { affinity_tag: 0 };
        let mut count: mach_msg_type_number_t = THREAD_AFFINITY_POLICY_COUNT;
        let mut get_default: boolean_t = 0;

        // SAFETY: `policy` lives across the call and `count` matches its size in integers.
        let status = unsafe {
            thread_policy_get(
                port,
                AFFINITY_FLAVOR,
                (&raw mut policy).cast::<integer_t>(),
                &raw mut count,
                &raw mut get_default,
            )
        };

        if status == KERN_SUCCESS {
            Ok(policy.affinity_tag)
        } else {
            Err(status)
        }
    }

    fn set_thread_affinity_tag_current(&self, tag: integer_t) -> Result<(), kern_return_t> {
        let port = current_thread_port();

        let mut policy = thread_affinity_policy_data_t { affinity_tag: tag };

        // SAFETY: `policy` lives across the call and the count matches its size in integers.
        let status = unsafe {
            thread_policy_set(
                port,
                AFFINITY_FLAVOR,
                (&raw mut policy).cast::<integer_t>(),
                THREAD_AFFINITY_POLICY_COUNT,
            )
        };

        if status == KERN_SUCCESS { Ok(()) } else { Err(status) }
    }

    fn getpid(&self) -> pid_t {
        // SAFETY: No safety requirements; getpid never fails.
        unsafe { libc::getpid() }
    }

    fn thread_id_current(&self) -> Result<u64, io::Error> {
        // SAFETY: No safety requirements.
        let self_thread = unsafe { pthread_self() };

        let mut thread_id: u64 = 0;

        // SAFETY: `self_thread` is the valid handle of the calling thread and the out
        // pointer refers to a live local.
        let result = unsafe { libc::pthread_threadid_np(self_thread, &raw mut thread_id) };

        if result == 0 {
            Ok(thread_id)
        } else {
            Err(io::Error::from_raw_os_error(result))
        }
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
