//! Error types and transaction status codes.
//!
//! The memory unit reports failures on two tiers:
//! 1. **Management errors** (`ModelError`): construction and control calls
//!    that cannot proceed. These are terminal for the call that raised them.
//! 2. **Transaction status** (`Status`): the per-request response code the
//!    RTL drives on its status lines. These are ordinary values; the model keeps
//!    operating after any of them.

use super::addr::PhysAddr;
use thiserror::Error;

/// Result alias for management-level operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Management-level failure of a model operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An argument or configuration field is out of range.
    #[error("bad argument: {0}")]
    BadArgument(&'static str),

    /// The backing store or TLB table could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// The configuration is well-formed but cannot be represented by the model.
    #[error("unsupported configuration: {0}")]
    Unsupported(&'static str),
}

impl ModelError {
    /// Returns the numeric code used by the management interface
    /// (`-1` bad argument, `-2` out of memory, `-3` unsupported).
    pub fn code(&self) -> i32 {
        match self {
            ModelError::BadArgument(_) => -1,
            ModelError::OutOfMemory => -2,
            ModelError::Unsupported(_) => -3,
        }
    }
}

/// Transaction status codes mirroring the RTL `memory_pkg` encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Status {
    /// Transaction completed.
    Ok = 0x0,

    /// Translation miss: no valid TLB entry covers the virtual page.
    ErrAddr = 0x1,

    /// Access violation: malformed read mask or physical index out of range.
    ErrAccess = 0x2,

    /// Malformed byte mask on a write.
    ErrWrite = 0x3,

    /// Outstanding request. Only the simulator bridge produces this; the
    /// reference model always completes synchronously.
    #[default]
    Pending = 0xF,
}

impl Status {
    /// Returns the 4-bit wire encoding.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a wire status, returning `None` for unassigned encodings.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x0 => Some(Status::Ok),
            0x1 => Some(Status::ErrAddr),
            0x2 => Some(Status::ErrAccess),
            0x3 => Some(Status::ErrWrite),
            0xF => Some(Status::Pending),
            _ => None,
        }
    }

    /// Returns true for `Status::Ok`.
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// Returns the RTL enumerator name.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Ok => "MEM_OK",
            Status::ErrAddr => "MEM_ERR_ADDR",
            Status::ErrAccess => "MEM_ERR_ACCESS",
            Status::ErrWrite => "MEM_ERR_WRITE",
            Status::Pending => "MEM_PENDING",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a virtual-to-physical translation.
///
/// On a miss the physical address is zero and must not be used.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    /// `Status::Ok` on a hit, `Status::ErrAddr` on a miss.
    pub status: Status,
    /// The translated physical address.
    pub paddr: PhysAddr,
}

impl TranslationResult {
    /// Creates a successful translation result.
    pub fn hit(paddr: PhysAddr) -> Self {
        Self {
            status: Status::Ok,
            paddr,
        }
    }

    /// Creates a translation miss.
    pub fn miss() -> Self {
        Self {
            status: Status::ErrAddr,
            paddr: PhysAddr::new(0),
        }
    }

    /// Returns true when the translation hit.
    pub fn is_hit(&self) -> bool {
        self.status.is_ok()
    }
}

/// Result of a masked read transaction.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadResult {
    /// Transaction status.
    pub status: Status,
    /// Assembled word, masked to the data width. Zero on any failure.
    pub data: u64,
}

impl ReadResult {
    /// Creates a completed read.
    pub fn ok(data: u64) -> Self {
        Self {
            status: Status::Ok,
            data,
        }
    }

    /// Creates a failed read carrying zero data.
    pub fn fault(status: Status) -> Self {
        Self { status, data: 0 }
    }
}
