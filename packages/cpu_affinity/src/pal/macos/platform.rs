use std::io;

use libc::integer_t;

use crate::error::{Error, Result};
use crate::pal::Platform;
use crate::pal::macos::{Bindings, BindingsFacade};
use crate::{AffinityMask, MaskEncoding, ProcessId, ProcessorId, ThreadId};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::real());

/// The platform that matches the crate's build target.
///
/// The Mach scheduler exposes no true affinity mask, only an advisory affinity tag: threads
/// sharing a tag are hinted onto the same core group. Masks here therefore use the opaque
/// tag encoding exclusively, and there is no way to name the executing processor.
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
}

impl Platform for BuildTargetPlatform {
    fn current_affinity(&self) -> Result<AffinityMask> {
        self.bindings
            .thread_affinity_tag_current()
            .map(|tag| AffinityMask::OpaqueTag(i64::from(tag)))
            .map_err(|status| Error::Query {
                operation: "the current thread's affinity tag",
                source: io::Error::other(format!("thread_policy_get returned {status}")),
            })
    }

    fn set_current_affinity(&self, mask: &AffinityMask) -> Result<()> {
        // Encoding validation happens here, before any native call.
        let AffinityMask::OpaqueTag(tag) = mask else {
            return Err(Error::EncodingMismatch {
                expected: MaskEncoding::OpaqueTag,
                actual: mask.encoding(),
            });
        };

        let tag = integer_t::try_from(*tag).map_err(|_| Error::InvalidMask {
            problem: format!("affinity tag {tag} does not fit the kernel's integer type"),
        })?;

        self.bindings
            .set_thread_affinity_tag_current(tag)
            .map_err(|status| Error::Set {
                status,
                source: io::Error::other(format!("thread_policy_set returned {status}")),
            })
    }

    fn mask_for(&self, _processors: &[ProcessorId]) -> Result<AffinityMask> {
        Err(Error::Unsupported {
            operation: "building a processor bitmask (this platform uses opaque affinity tags)",
        })
    }

    #[expect(
        clippy::cast_sign_loss,
        reason = "process identifiers are never negative on macOS"
    )]
    fn process_id(&self) -> Result<ProcessId> {
        Ok(self.bindings.getpid() as ProcessId)
    }

    fn thread_id(&self) -> Result<ThreadId> {
        self.bindings
            .thread_id_current()
            .map_err(|source| Error::Query {
                operation: "the calling thread's identifier",
                source,
            })
    }

    fn current_processor(&self) -> Result<ProcessorId> {
        Err(Error::Unsupported {
            operation: "identifying the executing processor",
        })
    }

    fn processor_count(&self) -> Result<usize> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::macos::MockBindings;

    #[test]
    fn affinity_round_trips_as_opaque_tag() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_thread_affinity_tag_current()
            .returning(|| Ok(7));
        bindings
            .expect_set_thread_affinity_tag_current()
            .withf(|tag| *tag == 7)
            .returning(|_| Ok(()));

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let mask = platform.current_affinity().unwrap();
        assert_eq!(mask, AffinityMask::OpaqueTag(7));

        platform.set_current_affinity(&mask).unwrap();
    }

    #[test]
    fn set_rejects_bitmask_encodings_before_any_native_call() {
        // No expectations on the mock - any native call would panic the test.
        let bindings = MockBindings::new();
        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.set_current_affinity(&AffinityMask::FixedWord(0b1)),
            Err(Error::EncodingMismatch {
                expected: MaskEncoding::OpaqueTag,
                actual: MaskEncoding::FixedWord,
            })
        ));

        assert!(matches!(
            platform.set_current_affinity(&AffinityMask::ByteBuffer(vec![1])),
            Err(Error::EncodingMismatch {
                expected: MaskEncoding::OpaqueTag,
                actual: MaskEncoding::ByteBuffer,
            })
        ));
    }

    #[test]
    fn rejected_tag_surfaces_kernel_status() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_set_thread_affinity_tag_current()
            .returning(|_| Err(46)); // KERN_POLICY_STATIC

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        let Err(Error::Set { status, .. }) =
            platform.set_current_affinity(&AffinityMask::OpaqueTag(1))
        else {
            panic!("expected a Set error");
        };

        assert_eq!(status, 46);
    }

    #[test]
    fn get_failure_surfaces_as_query_error_not_sentinel() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_thread_affinity_tag_current()
            .returning(|| Err(4)); // KERN_INVALID_ARGUMENT

        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.current_affinity(),
            Err(Error::Query { .. })
        ));
    }

    #[test]
    fn executing_processor_is_unsupported() {
        let bindings = MockBindings::new();
        let platform = BuildTargetPlatform::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(
            platform.current_processor(),
            Err(Error::Unsupported { .. })
        ));
    }
}
