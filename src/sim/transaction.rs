//! Memory transaction record.
//!
//! The unit of exchange between a stimulus source, the reference model and
//! the scoreboard. Field layout follows the RTL request/response interface:
//! one record carries both the request attributes and, once completed, the
//! response status and data.

use crate::common::Status;
use serde::{Deserialize, Serialize};

/// Operation encodings matching the RTL `memory_pkg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OpType {
    /// `MEM_READ`
    Read = 0x0,
    /// `MEM_WRITE`
    Write = 0x1,
    /// `MEM_TLB_LD`
    TlbLoad = 0x3,
}

impl OpType {
    /// Returns the wire encoding.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A single memory transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTransaction {
    pub op: OpType,
    pub status: Status,
    /// Byte enables for read/write; bit `i` selects byte lane `i`.
    pub byte_mask: u32,
    pub virt_addr: u64,
    pub phys_addr: u64,
    /// Write data on a request, read data on a response.
    pub data: u64,
    pub tlb_virt_base: u64,
    pub tlb_phys_base: u64,
    /// Request tag used to pair a response with its expectation.
    pub timestamp: u64,
}

impl Default for MemoryTransaction {
    fn default() -> Self {
        Self {
            op: OpType::Read,
            status: Status::Pending,
            byte_mask: 0xFF,
            virt_addr: 0,
            phys_addr: 0,
            data: 0,
            tlb_virt_base: 0,
            tlb_phys_base: 0,
            timestamp: 0,
        }
    }
}

impl MemoryTransaction {
    /// Builds a read request.
    pub fn read(timestamp: u64, virt_addr: u64, byte_mask: u32) -> Self {
        Self {
            op: OpType::Read,
            byte_mask,
            virt_addr,
            timestamp,
            ..Self::default()
        }
    }

    /// Builds a write request.
    pub fn write(timestamp: u64, virt_addr: u64, byte_mask: u32, data: u64) -> Self {
        Self {
            op: OpType::Write,
            byte_mask,
            virt_addr,
            data,
            timestamp,
            ..Self::default()
        }
    }

    /// Builds a TLB-load request.
    pub fn tlb_load(timestamp: u64, virt_base: u64, phys_base: u64) -> Self {
        Self {
            op: OpType::TlbLoad,
            tlb_virt_base: virt_base,
            tlb_phys_base: phys_base,
            timestamp,
            ..Self::default()
        }
    }

    /// Returns true once a response status has been assigned.
    pub fn is_complete(&self) -> bool {
        self.status != Status::Pending
    }
}
