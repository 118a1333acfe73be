use std::fmt::Debug;
use std::io;
#[cfg(test)]
use std::sync::Arc;

use libc::{c_long, integer_t, kern_return_t, pid_t};

#[cfg(test)]
use crate::pal::macos::MockBindings;
use crate::pal::macos::{Bindings, BuildTargetBindings};

/// Enum to hide the real/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Real(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn real() -> Self {
        Self::Real(&BuildTargetBindings)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockBindings) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Bindings for BindingsFacade {
    fn thread_affinity_tag_current(&self) -> Result<integer_t, kern_return_t> {
        match self {
            Self::Real(bindings) => bindings.thread_affinity_tag_current(),
            #[cfg(test)]
            Self::Mock(mock) => mock.thread_affinity_tag_current(),
        }
    }

    fn set_thread_affinity_tag_current(&self, tag: integer_t) -> Result<(), kern_return_t> {
        match self {
            Self::Real(bindings) => bindings.set_thread_affinity_tag_current(tag),
            #[cfg(test)]
            Self::Mock(mock) => mock.set_thread_affinity_tag_current(tag),
        }
    }

    fn getpid(&self) -> pid_t {
        match self {
            Self::Real(bindings) => bindings.getpid(),
            #[cfg(test)]
            Self::Mock(mock) => mock.getpid(),
        }
    }

    fn thread_id_current(&self) -> Result<u64, io::Error> {
        match self {
            Self::Real(bindings) => bindings.thread_id_current(),
            #[cfg(test)]
            Self::Mock(mock) => mock.thread_id_current(),
        }
    }

    fn nprocessors_online(&self) -> Result<c_long, io::Error> {
        match self {
            Self::Real(bindings) => bindings.nprocessors_online(),
            #[cfg(test)]
            Self::Mock(mock) => mock.nprocessors_online(),
        }
    }
}

impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
