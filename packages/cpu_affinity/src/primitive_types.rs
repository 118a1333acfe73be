/// Identifies a logical processor.
///
/// This will match the numeric identifier used by standard tooling of the operating system.
///
/// It is important to highlight that the values used are not guaranteed to be
/// sequential/contiguous or to start from zero (aspects that are also not guaranteed by
/// operating system tooling).
pub type ProcessorId = u32;

/// Identifies a process, matching the identifier assigned by the operating system.
pub type ProcessId = u32;

/// Identifies a thread within the operating system's scheduler.
///
/// This is the kernel-assigned identifier, not the identifier used by the Rust standard
/// library or any threading runtime.
pub type ThreadId = u64;
