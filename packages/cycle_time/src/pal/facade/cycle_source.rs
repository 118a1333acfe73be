use std::fmt::Debug;

use crate::CounterMode;
use crate::pal::CycleSource;
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
    not(miri)
))]
use crate::pal::CycleSourceImpl;
#[cfg(test)]
use crate::pal::MockCycleSource;
#[cfg(any(
    miri,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
use crate::pal::MonotonicCycleSource;
#[cfg(test)]
use std::sync::Arc;

#[derive(Clone)]
pub(crate) enum CycleSourceFacade {
    #[cfg(all(
        any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
        not(miri)
    ))]
    Native(CycleSourceImpl),

    #[cfg(any(
        miri,
        not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
    ))]
    Fallback(MonotonicCycleSource),

    #[cfg(test)]
    Mock(Arc<MockCycleSource>),
}

impl CycleSourceFacade {
    /// The strategy selected at compile time for the build target.
    pub(crate) fn build_target() -> Self {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
            not(miri)
        ))]
        {
            Self::Native(CycleSourceImpl)
        }

        #[cfg(any(
            miri,
            not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
        ))]
        {
            Self::Fallback(MonotonicCycleSource)
        }
    }
}

#[cfg(test)]
impl From<MockCycleSource> for CycleSourceFacade {
    fn from(source: MockCycleSource) -> Self {
        Self::Mock(Arc::new(source))
    }
}

impl CycleSource for CycleSourceFacade {
    fn cycles(&self) -> u64 {
        match self {
            #[cfg(all(
                any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
                not(miri)
            ))]
            Self::Native(source) => source.cycles(),
            #[cfg(any(
                miri,
                not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
            ))]
            Self::Fallback(source) => source.cycles(),
            #[cfg(test)]
            Self::Mock(source) => source.cycles(),
        }
    }

    fn mode(&self) -> CounterMode {
        match self {
            #[cfg(all(
                any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
                not(miri)
            ))]
            Self::Native(source) => source.mode(),
            #[cfg(any(
                miri,
                not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
            ))]
            Self::Fallback(source) => source.mode(),
            #[cfg(test)]
            Self::Mock(source) => source.mode(),
        }
    }
}

impl Debug for CycleSourceFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(all(
                any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
                not(miri)
            ))]
            Self::Native(source) => source.fmt(f),
            #[cfg(any(
                miri,
                not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
            ))]
            Self::Fallback(source) => source.fmt(f),
            #[cfg(test)]
            Self::Mock(source) => source.fmt(f),
        }
    }
}
