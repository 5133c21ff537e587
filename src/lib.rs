//! Memory Unit Reference Model Library.
//!
//! This crate implements a bit-exact reference model of a hardware memory
//! unit for use as a verification oracle. Given the stimulus the RTL receives,
//! it produces the responses the RTL must produce.
//!
//! # Architecture
//!
//! * **Engine**: a round-robin, fully associative TLB in front of a
//!   little-endian, byte-enabled word store, parameterised by address widths,
//!   page size, data width, depth and TLB capacity.
//! * **Harness**: transaction records, a scoreboard that pairs observed
//!   responses with reference responses, and a JSON stimulus runner.
//!
//! # Modules
//!
//! * `common`: Address types, bit-mask helpers, status codes and errors.
//! * `config`: Model parameters and TOML configuration loading.
//! * `core`: The translation & storage engine.
//! * `sim`: Scoreboard, stimulus and runner.
//! * `stats`: Run statistics.
//!
//! # Example
//!
//! ```
//! use memory_refmodel::{MemoryModel, Status};
//!
//! let mut model = MemoryModel::create(None).unwrap();
//! model.load_tlb(0x1000, 0x2000);
//! assert_eq!(model.write(0x1020, 0xFF, 0x1122_3344_5566_7788), Status::Ok);
//! assert_eq!(model.read(0x1020, 0xFF).data, 0x1122_3344_5566_7788);
//! ```

/// Shared types, status codes and error handling.
///
/// Provides the address newtypes, the bit-mask derivation helpers used to
/// support any width from 1 to 64 bits, and both error tiers.
pub mod common;

/// Configuration system for model parameters and driver settings.
pub mod config;

/// Translation & storage engine.
///
/// Implements the TLB, the backing store and the `MemoryModel` transaction
/// API, plus a lock-protected handle for multi-threaded callers.
pub mod core;

/// Reference-checking harness.
pub mod sim;

/// Run statistics collection and reporting.
pub mod stats;

pub use crate::common::{ModelError, ReadResult, Status, TranslationResult};
pub use crate::config::{Config, ModelConfig};
pub use crate::core::{MemoryModel, SharedModel};
