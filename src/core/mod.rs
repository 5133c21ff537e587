//! Translation & Storage Engine.
//!
//! The engine is split into the same units the RTL has:
//! * `tlb`: round-robin translation table.
//! * `storage`: little-endian word store with byte enables.
//! * `model`: the `MemoryModel` tying both together behind the transaction API.
//! * `shared`: lock-protected handle for multi-threaded callers.

/// Reference model tying TLB and storage together.
pub mod model;

/// Lock-protected model handle.
pub mod shared;

/// Backing store.
pub mod storage;

/// Translation Lookaside Buffer.
pub mod tlb;

pub use model::MemoryModel;
pub use shared::SharedModel;
pub use tlb::TlbEntry;
