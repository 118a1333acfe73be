use std::num::NonZeroUsize;

use crate::error::{Error, Result};
use crate::pal::Platform;
use crate::{AffinityMask, ProcessId, ProcessorId, ThreadId};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
#[allow(dead_code, reason = "conditional - only the primary platform wires this up")]
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = BuildTargetPlatform::new();

/// Fallback platform for operating systems without an affinity surface (and for Miri,
/// which cannot issue the native calls).
///
/// There is no pretending here: affinity operations report [`Error::Unsupported`] rather
/// than simulating success, because a caller that believes it pinned a thread when nothing
/// happened would draw wrong conclusions from its measurements. Only the facilities the
/// Rust standard library can answer honestly are implemented.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform;

impl BuildTargetPlatform {
    pub(crate) const fn new() -> Self {
        Self
    }
}

impl Platform for BuildTargetPlatform {
    fn current_affinity(&self) -> Result<AffinityMask> {
        Err(Error::Unsupported {
            operation: "querying thread affinity",
        })
    }

    fn set_current_affinity(&self, _mask: &AffinityMask) -> Result<()> {
        Err(Error::Unsupported {
            operation: "updating thread affinity",
        })
    }

    fn mask_for(&self, _processors: &[ProcessorId]) -> Result<AffinityMask> {
        Err(Error::Unsupported {
            operation: "building a processor bitmask",
        })
    }

    fn process_id(&self) -> Result<ProcessId> {
        Ok(std::process::id())
    }

    fn thread_id(&self) -> Result<ThreadId> {
        Err(Error::Unsupported {
            operation: "querying the OS thread identifier",
        })
    }

    fn current_processor(&self) -> Result<ProcessorId> {
        Err(Error::Unsupported {
            operation: "identifying the executing processor",
        })
    }

    fn processor_count(&self) -> Result<usize> {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .map_err(|source| Error::Query {
                operation: "the online processor count",
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinity_operations_are_unsupported_not_simulated() {
        let platform = BuildTargetPlatform::new();

        assert!(matches!(
            platform.current_affinity(),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            platform.set_current_affinity(&AffinityMask::FixedWord(1)),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            platform.mask_for(&[0]),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            platform.current_processor(),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn process_identity_still_works() {
        let platform = BuildTargetPlatform::new();

        assert_eq!(platform.process_id().unwrap(), std::process::id());
        assert!(platform.processor_count().unwrap() >= 1);
    }
}
