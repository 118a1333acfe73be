use std::fmt::Debug;

use crate::error::Result;
use crate::{AffinityMask, ProcessId, ProcessorId, ThreadId};

/// The affinity surface of one platform, selected at build time.
///
/// Every operation is a self-contained native call scoped to the calling thread or process;
/// implementations hold no mutable state and perform no caching.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Queries the OS for the calling thread's current permitted-processor set, in the
    /// platform's native encoding.
    fn current_affinity(&self) -> Result<AffinityMask>;

    /// Requests the OS restrict the calling thread to the processors described by `mask`.
    ///
    /// The mask must be in an encoding the platform understands; mismatches are rejected
    /// before any native call is issued.
    fn set_current_affinity(&self, mask: &AffinityMask) -> Result<()>;

    /// Builds a mask containing exactly `processors`, in the platform's native bitmask
    /// encoding. Fails where the platform has no bitmask encoding.
    fn mask_for(&self, processors: &[ProcessorId]) -> Result<AffinityMask>;

    /// The OS-assigned identifier of the calling process.
    fn process_id(&self) -> Result<ProcessId>;

    /// The OS-assigned identifier of the calling thread.
    fn thread_id(&self) -> Result<ThreadId>;

    /// The logical processor executing the calling thread at the instant of the call.
    fn current_processor(&self) -> Result<ProcessorId>;

    /// The number of logical processors the OS reports online.
    fn processor_count(&self) -> Result<usize>;
}
