//! Platform Abstraction Layer (PAL). Private API - the single compile-time-selected
//! counter-read strategy behind the public [`CycleCounter`][crate::CycleCounter] surface.

mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(miri)))]
mod tsc;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(miri)))]
pub(crate) use tsc::*;

#[cfg(all(target_arch = "aarch64", not(miri)))]
mod generic_timer;
#[cfg(all(target_arch = "aarch64", not(miri)))]
pub(crate) use generic_timer::*;

// The monotonic fallback is compiled in test mode on all architectures, under Miri, and as
// the primary implementation on architectures without a recognized counter instruction.
// However, we only glob-import it when it is the primary implementation; elsewhere it is
// accessed via the explicit path `monotonic::`.
#[cfg(any(
    test,
    miri,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
pub(crate) mod monotonic;

#[cfg(any(
    miri,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
pub(crate) use monotonic::*;
