use crate::CounterMode;
use crate::pal::CycleSource;

/// Reads the ARMv8 generic timer's virtual count register, `CNTVCT_EL0`.
///
/// This counter ticks at the fixed system counter frequency (`CNTFRQ_EL0`), not at the
/// core clock, and is synchronized across cores. Callers calibrating against elapsed
/// wall time must use that frequency, not the CPU frequency.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CycleSourceImpl;

impl CycleSource for CycleSourceImpl {
    fn cycles(&self) -> u64 {
        let value: u64;

        // SAFETY: CNTVCT_EL0 is readable from EL0 on every ARMv8-A system and the read
        // has no side effects.
        unsafe {
            core::arch::asm!(
                "mrs {0}, cntvct_el0",
                out(reg) value,
                options(nomem, nostack, preserves_flags),
            );
        }

        value
    }

    fn mode(&self) -> CounterMode {
        CounterMode::CycleCounter
    }
}
