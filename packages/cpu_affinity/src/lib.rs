//! Pin the calling thread to specific processors and identify where and as whom it is
//! executing.
//!
//! This crate is a thin, uniform surface over three incompatible native representations of
//! processor affinity: a 64-bit bitmask word, a variable-width byte buffer sized to the
//! kernel's affinity structure, and the opaque affinity tags of Mach-based schedulers. One
//! logical [`AffinityMask`] model spans all three; which encoding a build speaks is decided
//! at compile time, and encodings are never silently reinterpreted across platforms.
//!
//! Alongside the mask operations, [`Affinity`] reports the process identifier, the
//! kernel-level thread identifier, the logical processor executing the calling thread, and
//! the online processor count.
//!
//! # Failure policy
//!
//! Every operation returns an explicit [`Result`][std::result::Result]. There are no
//! fallback values: a failed affinity query never produces an "all processors" stand-in and
//! a failed update is never swallowed, because both would be indistinguishable from real
//! results and would mask genuine failures. Errors carry the native status code or errno
//! for diagnosis - see [`Error`].
//!
//! # Basic usage
//!
//! ```no_run
//! use cpu_affinity::Affinity;
//!
//! # fn main() -> Result<(), cpu_affinity::Error> {
//! let affinity = Affinity::new();
//!
//! println!("process {}, thread {}", affinity.process_id()?, affinity.thread_id()?);
//!
//! // Pin latency-sensitive work to processor 0.
//! let mask = affinity.mask_for(&[0])?;
//! affinity.set(&mask)?;
//! # Ok(())
//! # }
//! ```

mod pal;

mod affinity;
mod error;
mod mask;
mod primitive_types;

pub use affinity::*;
pub use error::*;
pub use mask::*;
pub use primitive_types::*;
