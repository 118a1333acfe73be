use crate::pal::{CycleSource, CycleSourceFacade};

/// Identifies the read strategy a [`CycleCounter`] is using, and therefore what units its
/// values are denominated in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "a counter read is either a hardware counter or a clock - a third option would be a new crate version anyway"
)]
pub enum CounterMode {
    /// Values come from a hardware counter instruction (`RDTSC` on x86/x86-64,
    /// `CNTVCT_EL0` on AArch64). Units are ticks of that counter.
    CycleCounter,

    /// Values are nanoseconds from the operating system's monotonic clock. Used on
    /// architectures without a recognized counter instruction.
    MonotonicClock,
}

/// Reads the processor's hardware cycle counter with minimal overhead.
///
/// A read is a single unprivileged instruction on supported architectures, making it
/// suitable for instrumenting hot paths where even a clock syscall is too expensive.
///
/// Only differences between two values are meaningful. The absolute value has no defined
/// epoch, and on x86 systems without an invariant TSC, values read on different processors
/// are not comparable - pin the thread first if cross-read arithmetic matters. Use
/// [`mode`][Self::mode] to learn the units: ticks of the hardware counter, or nanoseconds
/// when the build target has no recognized counter instruction.
///
/// ```
/// use cycle_time::CycleCounter;
///
/// let counter = CycleCounter::new();
///
/// let before = counter.cycles();
/// // Do some work...
/// let after = counter.cycles();
///
/// println!("work took {} {:?} units", after.wrapping_sub(before), counter.mode());
/// ```
#[derive(Clone, Debug)]
pub struct CycleCounter {
    inner: CycleSourceFacade,
}

impl CycleCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: CycleSourceFacade::build_target(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn from_pal(inner: CycleSourceFacade) -> Self {
        Self { inner }
    }

    /// The current raw counter value.
    ///
    /// This never fails - when the hardware counter is unavailable the value comes from
    /// the monotonic clock instead, as reported by [`mode`][Self::mode].
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.inner.cycles()
    }

    /// Which read strategy the build target selected.
    #[must_use]
    pub fn mode(&self) -> CounterMode {
        self.inner.mode()
    }
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::pal::MockCycleSource;

    assert_impl_all!(CycleCounter: Send, Sync);
    assert_impl_all!(CounterMode: Send, Sync);

    #[test]
    fn delegates_to_pal() {
        let mut mock = MockCycleSource::new();
        mock.expect_cycles().times(2).returning({
            let mut next = 100_u64;
            move || {
                next = next.wrapping_add(1);
                next
            }
        });
        mock.expect_mode()
            .return_const(CounterMode::CycleCounter);

        let counter = CycleCounter::from_pal(mock.into());

        assert_eq!(counter.cycles(), 101);
        assert_eq!(counter.cycles(), 102);
        assert_eq!(counter.mode(), CounterMode::CycleCounter);
    }

    #[test]
    fn mode_is_stable_across_reads() {
        let counter = CycleCounter::new();

        let first = counter.mode();
        _ = counter.cycles();

        assert_eq!(counter.mode(), first);
    }

    #[cfg(not(miri))] // Miri cannot execute counter instructions.
    #[test]
    fn counter_advances_across_a_sleep() {
        let counter = CycleCounter::new();

        let before = counter.cycles();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let after = counter.cycles();

        assert!(after > before);
    }
}
