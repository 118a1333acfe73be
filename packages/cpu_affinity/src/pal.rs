//! Platform Abstraction Layer (PAL). Private API - the single compile-time-selected
//! implementation behind the public [`Affinity`][crate::Affinity] surface.

mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

#[cfg(all(target_os = "linux", not(miri)))]
mod linux;
#[cfg(all(target_os = "linux", not(miri)))]
pub(crate) use linux::*;

#[cfg(all(target_os = "macos", not(miri)))]
mod macos;
#[cfg(all(target_os = "macos", not(miri)))]
pub(crate) use macos::*;

// The fallback module is compiled in test mode on all platforms, under Miri, and as the
// primary implementation on unsupported platforms. However, we only glob-import it when it
// is the primary implementation. On supported platforms in test mode, it must be accessed
// via the explicit path `fallback::` to avoid ambiguity with the platform-specific
// implementation.
#[cfg(any(test, miri, not(any(target_os = "linux", target_os = "macos"))))]
pub(crate) mod fallback;

#[cfg(any(miri, not(any(target_os = "linux", target_os = "macos"))))]
pub(crate) use fallback::*;
