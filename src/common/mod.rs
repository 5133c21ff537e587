//! Common utilities and types used throughout the memory reference model.
//!
//! This module provides the value types shared by the engine, the
//! configuration layer and the checking harness.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Bit-mask derivation helpers.
pub mod bits;

/// Memory access type definitions.
pub mod data;

/// Error types and transaction status codes.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use data::AccessType;
pub use error::{ModelError, ReadResult, Result, Status, TranslationResult};
