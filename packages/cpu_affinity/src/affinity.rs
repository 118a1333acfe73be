use crate::error::Result;
use crate::pal::{Platform, PlatformFacade};
use crate::{AffinityMask, ProcessId, ProcessorId, ThreadId};

/// Queries and updates the processor affinity of the calling thread.
///
/// Every method is a single self-contained native call: synchronous, non-blocking beyond the
/// syscall itself, and free of shared mutable state, so a handle can be used from any number
/// of threads concurrently. Each call operates only on calling-thread or calling-process
/// state; nothing is cached between calls.
///
/// Which mask encoding the platform speaks is a compile-time property of the build target -
/// see [`AffinityMask`] for the three encodings and their rules.
///
/// # Example
///
/// ```no_run
/// use cpu_affinity::Affinity;
///
/// # fn main() -> Result<(), cpu_affinity::Error> {
/// let affinity = Affinity::new();
///
/// // Restrict the calling thread to the first processor.
/// let mask = affinity.mask_for(&[0])?;
/// affinity.set(&mask)?;
///
/// assert_eq!(affinity.current_processor()?, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Affinity {
    pal: PlatformFacade,
}

impl Affinity {
    /// Creates a handle wired to the platform this crate was compiled for.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pal(PlatformFacade::real())
    }

    pub(crate) fn from_pal(pal: PlatformFacade) -> Self {
        Self { pal }
    }

    /// Queries the OS for the calling thread's current permitted-processor set.
    ///
    /// The result arrives in the platform's native encoding and is valid input only to
    /// [`set`][Self::set] on the same platform. On failure the caller receives no mask at
    /// all - an error is authoritative "mask unknown" and is never papered over with an
    /// all-processors default.
    pub fn current(&self) -> Result<AffinityMask> {
        self.pal.current_affinity()
    }

    /// Requests the OS restrict the calling thread to the processors described by `mask`.
    ///
    /// The mask's encoding must match the platform's; a mismatched encoding is rejected
    /// with [`Error::EncodingMismatch`][crate::Error::EncodingMismatch] before any native
    /// call is issued. Bit positions at or above the OS-reported processor count are passed
    /// through unchanged and ignored by the kernel (standard masking semantics).
    ///
    /// Takes effect immediately for future scheduling decisions of the calling thread.
    pub fn set(&self, mask: &AffinityMask) -> Result<()> {
        self.pal.set_current_affinity(mask)
    }

    /// Builds a mask containing exactly `processors`, in the platform's native bitmask
    /// encoding, ready to pass to [`set`][Self::set].
    ///
    /// Fails with [`Error::Unsupported`][crate::Error::Unsupported] on platforms whose
    /// affinity model has no bitmask form (Mach affinity tags).
    pub fn mask_for(&self, processors: &[ProcessorId]) -> Result<AffinityMask> {
        self.pal.mask_for(processors)
    }

    /// The OS-assigned identifier of the calling process.
    ///
    /// Queried fresh on every call; stable for the lifetime of the process.
    pub fn process_id(&self) -> Result<ProcessId> {
        self.pal.process_id()
    }

    /// The OS-assigned identifier of the calling thread.
    ///
    /// Queried fresh on every call; stable for the lifetime of the thread and distinct
    /// between concurrently running threads of one process.
    pub fn thread_id(&self) -> Result<ThreadId> {
        self.pal.thread_id()
    }

    /// The logical processor executing the calling thread at the instant of the call.
    ///
    /// This is an advisory, instantaneous sample: unless the thread is pinned to a single
    /// processor, the scheduler may have migrated it by the time the caller inspects the
    /// value. That staleness is inherent to the operation, not a defect.
    pub fn current_processor(&self) -> Result<ProcessorId> {
        self.pal.current_processor()
    }

    /// The number of logical processors the OS reports online.
    pub fn processor_count(&self) -> Result<usize> {
        self.pal.processor_count()
    }
}

impl Default for Affinity {
    fn default() -> Self {
        Self::new()
    }
}
