//! Reference-checking harness.
//!
//! Drives stimulus through a shadow `MemoryModel` and compares the responses
//! of the design under test against it.

/// Stimulus runner.
pub mod runner;

/// Response comparison against the reference model.
pub mod scoreboard;

/// Stimulus programs and their JSON format.
pub mod stimulus;

/// Memory transaction record.
pub mod transaction;

pub use runner::run;
pub use scoreboard::Scoreboard;
pub use stimulus::{Expect, Step, Stimulus, StimulusError};
pub use transaction::{MemoryTransaction, OpType};
