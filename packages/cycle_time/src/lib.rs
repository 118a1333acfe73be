//! Provides direct access to the processor's hardware cycle counter.
//!
//! This crate offers a [`CycleCounter`] that reads the raw counter with a single
//! unprivileged instruction, making it the cheapest way to timestamp events in hot paths
//! where even a monotonic clock syscall shows up in profiles.
//!
//! # Key Features
//!
//! - **Minimal overhead**: One instruction per read on supported architectures
//! - **Infallible reads**: Architectures without a counter fall back to the monotonic clock
//! - **Honest units**: [`CounterMode`] reports whether values are ticks or nanoseconds
//!
//! # Trade-offs
//!
//! - Values have no defined epoch; only differences between reads are meaningful
//! - On x86 systems without an invariant TSC, reads taken on different processors are
//!   not comparable
//! - Tick frequency varies by system and must be calibrated externally if wall-time
//!   conversion is needed
//!
//! # Basic Usage
//!
//! ```rust
//! use cycle_time::CycleCounter;
//!
//! let counter = CycleCounter::new();
//!
//! let start = counter.cycles();
//!
//! // Do some work...
//! std::thread::sleep(std::time::Duration::from_millis(10));
//!
//! let elapsed = counter.cycles().wrapping_sub(start);
//! println!("Work took {elapsed} {:?} units", counter.mode());
//! ```

mod pal;

mod counter;

pub use counter::*;
