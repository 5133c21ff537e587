//! Memory Access Types.
//!
//! Classification of the data transactions the memory unit accepts. The
//! model uses it to pick the status code for a malformed byte mask: the RTL
//! reports a bad mask on a read as an access violation, but the same fault
//! on a write carries its own write-error code.

use super::error::Status;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access.
    Read,

    /// Data write access.
    Write,
}

impl AccessType {
    /// Returns the status reported when the byte mask selects lanes beyond
    /// the configured word.
    pub fn mask_fault(self) -> Status {
        match self {
            AccessType::Read => Status::ErrAccess,
            AccessType::Write => Status::ErrWrite,
        }
    }
}
