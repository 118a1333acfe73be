use crate::CounterMode;
use crate::pal::CycleSource;

/// Re-expresses a monotonic OS clock as a single 64-bit nanosecond count
/// (`seconds * 1e9 + nanoseconds`).
///
/// This is the strategy for architectures without a recognized counter instruction (and
/// for Miri). The values do not share units with a true cycle counter - they are
/// nanoseconds - which is why [`CounterMode`] is part of the public contract.
#[derive(Clone, Copy, Debug, Default)]
#[allow(dead_code, reason = "conditional - primary only on fallback architectures")]
pub(crate) struct MonotonicCycleSource;

impl CycleSource for MonotonicCycleSource {
    #[cfg(unix)]
    fn cycles(&self) -> u64 {
        use std::{io, mem};

        // SAFETY: All-zero is a valid initial value for this type.
        let mut ts: libc::timespec = unsafe { mem::zeroed() };

        // SAFETY: We are passing valid arguments, no other safety requirements.
        let result = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &raw mut ts) };

        assert!(result == 0, "{}", io::Error::last_os_error());

        #[expect(
            clippy::cast_sign_loss,
            clippy::arithmetic_side_effects,
            reason = "never going to happen with timestamps within real-universe ranges"
        )]
        {
            ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
        }
    }

    #[cfg(not(unix))]
    fn cycles(&self) -> u64 {
        use std::sync::OnceLock;
        use std::time::Instant;

        // The standard library exposes no absolute monotonic value, so nanoseconds are
        // counted from a process-local epoch. Differences remain meaningful, which is all
        // the contract promises.
        static EPOCH: OnceLock<Instant> = OnceLock::new();

        let elapsed = EPOCH.get_or_init(Instant::now).elapsed();

        u64::try_from(elapsed.as_nanos())
            .expect("process uptime in nanoseconds exceeded u64 - not a realistic runtime")
    }

    fn mode(&self) -> CounterMode {
        CounterMode::MonotonicClock
    }
}
