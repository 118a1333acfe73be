use std::fmt::Debug;
#[cfg(test)]
use std::sync::Arc;

use crate::error::Result;
#[cfg(test)]
use crate::pal::MockPlatform;
use crate::pal::{BUILD_TARGET_PLATFORM, BuildTargetPlatform, Platform};
use crate::{AffinityMask, ProcessId, ProcessorId, ThreadId};

/// Enum to hide the real/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Real(&'static BuildTargetPlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(&BUILD_TARGET_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Platform for PlatformFacade {
    fn current_affinity(&self) -> Result<AffinityMask> {
        match self {
            Self::Real(platform) => platform.current_affinity(),
            #[cfg(test)]
            Self::Mock(mock) => mock.current_affinity(),
        }
    }

    fn set_current_affinity(&self, mask: &AffinityMask) -> Result<()> {
        match self {
            Self::Real(platform) => platform.set_current_affinity(mask),
            #[cfg(test)]
            Self::Mock(mock) => mock.set_current_affinity(mask),
        }
    }

    fn mask_for(&self, processors: &[ProcessorId]) -> Result<AffinityMask> {
        match self {
            Self::Real(platform) => platform.mask_for(processors),
            #[cfg(test)]
            Self::Mock(mock) => mock.mask_for(processors),
        }
    }

    fn process_id(&self) -> Result<ProcessId> {
        match self {
            Self::Real(platform) => platform.process_id(),
            #[cfg(test)]
            Self::Mock(mock) => mock.process_id(),
        }
    }

    fn thread_id(&self) -> Result<ThreadId> {
        match self {
            Self::Real(platform) => platform.thread_id(),
            #[cfg(test)]
            Self::Mock(mock) => mock.thread_id(),
        }
    }

    fn current_processor(&self) -> Result<ProcessorId> {
        match self {
            Self::Real(platform) => platform.current_processor(),
            #[cfg(test)]
            Self::Mock(mock) => mock.current_processor(),
        }
    }

    fn processor_count(&self) -> Result<usize> {
        match self {
            Self::Real(platform) => platform.processor_count(),
            #[cfg(test)]
            Self::Mock(mock) => mock.processor_count(),
        }
    }
}

impl From<&'static BuildTargetPlatform> for PlatformFacade {
    fn from(platform: &'static BuildTargetPlatform) -> Self {
        Self::Real(platform)
    }
}

#[cfg(test)]
impl From<MockPlatform> for PlatformFacade {
    fn from(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
