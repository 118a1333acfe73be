use std::{io, mem, ptr, slice};

use libc::cpu_set_t;

use crate::error::{Error, Result};
use crate::pal::Platform;
use crate::pal::linux::{Bindings, BindingsFacade};
use crate::{AffinityMask, MaskEncoding, ProcessId, ProcessorId, ThreadId};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::real());

/// The platform that matches the crate's build target.
///
/// The kernel affinity structure is `cpu_set_t`, a 1024-bit bitmask. We surface it as the
/// fixed-width word encoding when the reported processor count fits in 64 bits and as the
/// byte-buffer encoding otherwise; a set call accepts either bitmask encoding, so a value
/// obtained from a get call always round-trips.
///
/// You would only use a different platform in unit tests that need to mock the platform.
/// Even then, whenever possible, unit tests should use the real platform for maximum realism.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,
}

impl BuildTargetPlatform {
    pub(crate) const fn new(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }

    fn reported_processor_count(&self) -> Result<usize> {
        let count = self
            .bindings
            .nprocessors_online()
            .map_err(|source| Error::Query {
                operation: "the online processor count",
                source,
            })?;

        #[expect(
            clippy::cast_sign_loss,
            reason = "the bindings reject non-positive sysconf results"
        )]
        Ok(count as usize)
    }

    fn cpuset_from_mask(mask: &AffinityMask) -> Result<cpu_set_t> {
        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: cpu_set_t = unsafe { mem::zeroed() };

        match mask {
            AffinityMask::FixedWord(word) => {
                for processor in 0..u64::BITS {
                    if (word >> processor) & 1 == 1 {
                        // SAFETY: The bit index is below the 1024-bit cpu_set_t capacity.
                        unsafe { libc::CPU_SET(processor as usize, &mut cpuset) };
                    }
                }
            }
            AffinityMask::ByteBuffer(bytes) => {
                if bytes.len() > size_of::<cpu_set_t>() {
                    return Err(Error::InvalidMask {
                        problem: format!(
                            "buffer of {} bytes exceeds the {} byte kernel affinity structure",
                            bytes.len(),
                            size_of::<cpu_set_t>()
                        ),
                    });
                }

                // SAFETY: The length was checked against the destination size above and the
                // destination is a freshly zeroed local, so the regions cannot overlap.
                unsafe {
                    ptr::copy_nonoverlapping(
                        bytes.as_ptr(),
                        (&raw mut cpuset).cast::<u8>(),
                        bytes.len(),
                    );
                }
            }
            AffinityMask::OpaqueTag(_) => {
                return Err(Error::EncodingMismatch {
                    expected: MaskEncoding::ByteBuffer,
                    actual: MaskEncoding::OpaqueTag,
                });
            }
        }

        Ok(cpuset)
    }

    fn cpuset_to_bytes(cpuset: &cpu_set_t) -> Vec<u8> {
        // SAFETY: cpu_set_t is a plain bit array; any bit pattern is a valid byte view.
        let bytes =
            unsafe { slice::from_raw_parts((&raw const *cpuset).cast::<u8>(), size_of::<cpu_set_t>()) };

        bytes.to_vec()
    }
}

impl Platform for BuildTargetPlatform {
    fn current_affinity(&self) -> Result<AffinityMask> {
        let cpuset = self
            .bindings
            .sched_getaffinity_current()
            .map_err(|source| Error::Query {
                operation: "the current thread's affinity mask",
                source,
            })?;

        if self.reported_processor_count()? <= u64::BITS as usize {
            let mut word = 0_u64;

            for processor in 0..u64::BITS {
                // SAFETY: The bit index is below the 1024-bit cpu_set_t capacity.
                if unsafe { libc::CPU_ISSET(processor as usize, &cpuset) } {
                    word |= 1 << processor;
                }
            }

            Ok(AffinityMask::FixedWord(word))
        } else {
            Ok(AffinityMask::ByteBuffer(Self::cpuset_to_bytes(&cpuset)))
        }
    }

    fn set_current_affinity(&self, mask: &AffinityMask) -> Result<()> {
        // Encoding validation happens here, before any syscall. Bits at or above the reported
        // processor count are deliberately passed through - the kernel clamps them.
        let cpuset = Self::cpuset_from_mask(mask)?;

        self.bindings
            .sched_setaffinity_current(&cpuset)
            .map_err(|source| match source.raw_os_error() {
                Some(libc::EPERM | libc::EACCES) => Error::PermissionDenied { source },
                raw => Error::Set {
                    status: raw.unwrap_or(-1),
                    source,
                },
            })
    }

    fn mask_for(&self, processors: &[ProcessorId]) -> Result<AffinityMask> {
        if self.reported_processor_count()? <= u64::BITS as usize {
            let mut word = 0_u64;

            for &processor in processors {
                if processor >= u64::BITS {
                    return Err(Error::InvalidMask {
                        problem: format!(
                            "processor {processor} does not fit the fixed-width word encoding"
                        ),
                    });
                }

                word |= 1 << processor;
            }

            Ok(AffinityMask::FixedWord(word))
        } else {
            let mut mask = AffinityMask::ByteBuffer(vec![0; size_of::<cpu_set_t>()]);

            for &processor in processors {
                mask.include(processor)?;
            }

            Ok(mask)
        }
    }

    #[expect(
        clippy::cast_sign_loss,
        reason = "process identifiers are never negative on Linux"
    )]
    fn process_id(&self) -> Result<ProcessId> {
        Ok(self.bindings.getpid() as ProcessId)
    }

    #[expect(
        clippy::cast_sign_loss,
        reason = "thread identifiers are never negative on Linux"
    )]
    fn thread_id(&self) -> Result<ThreadId> {
        Ok(self.bindings.gettid() as ThreadId)
    }

    fn current_processor(&self) -> Result<ProcessorId> {
        let cpu = self.bindings.sched_getcpu();

        if cpu < 0 {
            return Err(Error::Query {
                operation: "the executing processor",
                source: io::Error::last_os_error(),
            });
        }

        #[expect(
            clippy::cast_sign_loss,
            reason = "negative values were rejected above"
        )]
        Ok(cpu as ProcessorId)
    }

    fn processor_count(&self) -> Result<usize> {
        self.reported_processor_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::linux::MockBindings;

    fn cpuset_with(processors: &[usize]) -> cpu_set_t {
        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: cpu_set_t = unsafe { mem::zeroed() };

        for &processor in processors {
            // SAFETY: Test inputs stay below the cpu_set_t capacity.
            unsafe { libc::CPU_SET(processor, &mut cpuset) };
        }

        cpuset
    }

    #[test]
    fn small_system_affinity_is_fixed_word() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_getaffinity_current()
            .returning(|| Ok(cpuset_with(&[0, 2, 5])));
        bindings.expect_nprocessors_online().returning(|| Ok(8));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.current_affinity().unwrap();
        assert_eq!(mask, AffinityMask::FixedWord(0b10_0101));
    }

    #[test]
    fn large_system_affinity_is_byte_buffer() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_getaffinity_current()
            .returning(|| Ok(cpuset_with(&[0, 77])));
        bindings.expect_nprocessors_online().returning(|| Ok(96));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.current_affinity().unwrap();
        assert_eq!(mask.encoding(), MaskEncoding::ByteBuffer);
        assert_eq!(mask.bit_capacity(), Some(8 * size_of::<cpu_set_t>() as u32));
        assert_eq!(mask.contains(0), Some(true));
        assert_eq!(mask.contains(1), Some(false));
        assert_eq!(mask.contains(77), Some(true));
    }

    #[test]
    fn get_failure_surfaces_as_query_error_not_sentinel() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_getaffinity_current()
            .returning(|| Err(io::Error::from_raw_os_error(libc::ESRCH)));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.current_affinity(),
            Err(Error::Query { .. })
        ));
    }

    #[test]
    fn set_fixed_word_translates_bits_to_cpuset() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_setaffinity_current()
            .withf(|cpuset| {
                // SAFETY: The bit indexes are below the cpu_set_t capacity.
                unsafe {
                    libc::CPU_ISSET(0, cpuset)
                        && !libc::CPU_ISSET(1, cpuset)
                        && libc::CPU_ISSET(2, cpuset)
                }
            })
            .returning(|_| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        platform
            .set_current_affinity(&AffinityMask::FixedWord(0b101))
            .unwrap();
    }

    #[test]
    fn set_byte_buffer_round_trips_get_result() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_getaffinity_current()
            .returning(|| Ok(cpuset_with(&[3, 70])));
        bindings.expect_nprocessors_online().returning(|| Ok(128));
        bindings
            .expect_sched_setaffinity_current()
            .withf(|cpuset| {
                // SAFETY: The bit indexes are below the cpu_set_t capacity.
                unsafe { libc::CPU_ISSET(3, cpuset) && libc::CPU_ISSET(70, cpuset) }
            })
            .returning(|_| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.current_affinity().unwrap();
        platform.set_current_affinity(&mask).unwrap();
    }

    #[test]
    fn set_rejects_opaque_tag_before_any_syscall() {
        // No expectations on the mock - any native call would panic the test.
        let bindings = MockBindings::new();
        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.set_current_affinity(&AffinityMask::OpaqueTag(1)),
            Err(Error::EncodingMismatch {
                expected: MaskEncoding::ByteBuffer,
                actual: MaskEncoding::OpaqueTag,
            })
        ));
    }

    #[test]
    fn set_rejects_oversized_buffer_before_any_syscall() {
        let bindings = MockBindings::new();
        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let oversized = AffinityMask::ByteBuffer(vec![0xFF; size_of::<cpu_set_t>() + 1]);

        assert!(matches!(
            platform.set_current_affinity(&oversized),
            Err(Error::InvalidMask { .. })
        ));
    }

    #[test]
    fn set_permission_failure_maps_to_permission_denied() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_setaffinity_current()
            .returning(|_| Err(io::Error::from_raw_os_error(libc::EPERM)));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.set_current_affinity(&AffinityMask::FixedWord(1)),
            Err(Error::PermissionDenied { .. })
        ));
    }

    #[test]
    fn set_other_failure_preserves_errno() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_sched_setaffinity_current()
            .returning(|_| Err(io::Error::from_raw_os_error(libc::EINVAL)));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let Err(Error::Set { status, .. }) =
            platform.set_current_affinity(&AffinityMask::FixedWord(1))
        else {
            panic!("expected a Set error");
        };

        assert_eq!(status, libc::EINVAL);
    }

    #[test]
    fn mask_for_uses_native_bitmask_encoding() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_online().returning(|| Ok(4));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.mask_for(&[0, 3]).unwrap();
        assert_eq!(mask, AffinityMask::FixedWord(0b1001));
    }

    #[test]
    fn mask_for_rejects_processor_beyond_word_on_small_system() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_online().returning(|| Ok(4));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.mask_for(&[64]),
            Err(Error::InvalidMask { .. })
        ));
    }

    #[test]
    fn mask_for_large_system_builds_byte_buffer() {
        let mut bindings = MockBindings::new();
        bindings.expect_nprocessors_online().returning(|| Ok(96));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.mask_for(&[0, 90]).unwrap();
        assert_eq!(mask.encoding(), MaskEncoding::ByteBuffer);
        assert_eq!(mask.processors(), Some(vec![0, 90]));
    }

    #[test]
    fn identifiers_pass_through_from_bindings() {
        let mut bindings = MockBindings::new();
        bindings.expect_getpid().returning(|| 1234);
        bindings.expect_gettid().returning(|| 5678);
        bindings.expect_sched_getcpu().returning(|| 2);

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert_eq!(platform.process_id().unwrap(), 1234);
        assert_eq!(platform.thread_id().unwrap(), 5678);
        assert_eq!(platform.current_processor().unwrap(), 2);
    }

    #[test]
    fn negative_sched_getcpu_is_a_query_error() {
        let mut bindings = MockBindings::new();
        bindings.expect_sched_getcpu().returning(|| -1);

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.current_processor(),
            Err(Error::Query { .. })
        ));
    }
}
