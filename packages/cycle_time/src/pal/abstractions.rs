use std::fmt::Debug;

use crate::CounterMode;

/// One compiled-in strategy for reading the counter.
///
/// A read is a single instruction or clock syscall with no side effects; implementations
/// hold no state and are freely shared across threads.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait CycleSource: Debug + Send + Sync + 'static {
    /// The raw 64-bit counter value. Only differences between two reads taken on the same
    /// processor are meaningful.
    fn cycles(&self) -> u64;

    /// Which read strategy this source implements, and therefore what units
    /// [`cycles`][Self::cycles] is denominated in.
    fn mode(&self) -> CounterMode;
}
