//! Reference-checking scoreboard.
//!
//! The scoreboard keeps a shadow `MemoryModel`. Each request is applied to the
//! shadow as soon as it is submitted, so the expected response reflects the
//! state the hardware should have seen at issue time. Responses obtained from
//! the design under test are then paired with their expectation by request
//! timestamp and compared field by field.

use crate::common::{Result, Status};
use crate::config::ModelConfig;
use crate::core::MemoryModel;
use crate::sim::transaction::{MemoryTransaction, OpType};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{error, info, warn};

/// Compares DUT responses against the reference model.
pub struct Scoreboard {
    model: MemoryModel,
    /// Expected responses, keyed by (timestamp, submission order).
    pending: BTreeMap<(u64, u64), MemoryTransaction>,
    seq: u64,
    matches: u64,
    mismatches: u64,
    log: Vec<String>,
}

impl Scoreboard {
    /// Creates a scoreboard with its own reference model.
    pub fn new(config: ModelConfig) -> Result<Self> {
        Ok(Self {
            model: MemoryModel::new(config)?,
            pending: BTreeMap::new(),
            seq: 0,
            matches: 0,
            mismatches: 0,
            log: Vec::new(),
        })
    }

    /// Applies `req` to the reference model and queues the expected response.
    ///
    /// # Returns
    ///
    /// A copy of the expected response.
    pub fn submit_request(&mut self, req: &MemoryTransaction) -> MemoryTransaction {
        let expected = self.expect(req);
        self.pending.insert((req.timestamp, self.seq), expected);
        self.seq += 1;
        expected
    }

    fn expect(&mut self, req: &MemoryTransaction) -> MemoryTransaction {
        let mut expected = MemoryTransaction {
            op: req.op,
            timestamp: req.timestamp,
            ..MemoryTransaction::default()
        };

        match req.op {
            OpType::Read => {
                let result = self.model.read(req.virt_addr, req.byte_mask);
                expected.status = result.status;
                expected.data = result.data;
                expected.virt_addr = req.virt_addr;
                expected.byte_mask = req.byte_mask;
                expected.phys_addr = self.model.translate(req.virt_addr).paddr.val();
            }
            OpType::Write => {
                expected.status = self.model.write(req.virt_addr, req.byte_mask, req.data);
                expected.virt_addr = req.virt_addr;
                expected.byte_mask = req.byte_mask;
                expected.data = req.data;
                expected.phys_addr = self.model.translate(req.virt_addr).paddr.val();
            }
            OpType::TlbLoad => {
                self.model.load_tlb(req.tlb_virt_base, req.tlb_phys_base);
                expected.status = Status::Ok;
                expected.tlb_virt_base = req.tlb_virt_base;
                expected.tlb_phys_base = req.tlb_phys_base;
            }
        }
        expected
    }

    /// Compares `resp` against the oldest pending expectation with the same
    /// timestamp.
    ///
    /// # Returns
    ///
    /// `true` on a match. A response with no pending expectation counts as a
    /// mismatch.
    pub fn submit_response(&mut self, resp: &MemoryTransaction) -> bool {
        let key = self
            .pending
            .range((resp.timestamp, 0)..=(resp.timestamp, u64::MAX))
            .next()
            .map(|(k, _)| *k);

        let Some(expected) = key.and_then(|k| self.pending.remove(&k)) else {
            let msg = format!(
                "response with no pending request (timestamp {})",
                resp.timestamp
            );
            warn!("{}", msg);
            self.log.push(msg);
            self.mismatches += 1;
            return false;
        };

        match Self::compare(resp, &expected) {
            None => {
                self.matches += 1;
                true
            }
            Some(diff) => {
                let msg = format!("timestamp {}: {}", resp.timestamp, diff.trim_end());
                warn!("{}", msg);
                self.log.push(msg);
                self.mismatches += 1;
                false
            }
        }
    }

    fn compare(actual: &MemoryTransaction, expected: &MemoryTransaction) -> Option<String> {
        let mut diff = String::new();

        if actual.op != expected.op {
            let _ = writeln!(
                diff,
                "operation mismatch: actual={:?} expected={:?}",
                actual.op, expected.op
            );
        }
        if actual.status != expected.status {
            let _ = writeln!(
                diff,
                "status mismatch: actual={} expected={}",
                actual.status, expected.status
            );
        }

        match actual.op {
            OpType::Read | OpType::Write => {
                if actual.data != expected.data {
                    let _ = writeln!(
                        diff,
                        "data mismatch: actual={:#x} expected={:#x}",
                        actual.data, expected.data
                    );
                }
                if actual.byte_mask != expected.byte_mask {
                    let _ = writeln!(
                        diff,
                        "byte mask mismatch: actual={:#x} expected={:#x}",
                        actual.byte_mask, expected.byte_mask
                    );
                }
                if actual.virt_addr != expected.virt_addr {
                    let _ = writeln!(
                        diff,
                        "virtual address mismatch: actual={:#x} expected={:#x}",
                        actual.virt_addr, expected.virt_addr
                    );
                }
            }
            OpType::TlbLoad => {
                if actual.tlb_virt_base != expected.tlb_virt_base {
                    let _ = writeln!(
                        diff,
                        "TLB virt base mismatch: actual={:#x} expected={:#x}",
                        actual.tlb_virt_base, expected.tlb_virt_base
                    );
                }
                if actual.tlb_phys_base != expected.tlb_phys_base {
                    let _ = writeln!(
                        diff,
                        "TLB phys base mismatch: actual={:#x} expected={:#x}",
                        actual.tlb_phys_base, expected.tlb_phys_base
                    );
                }
            }
        }

        if diff.is_empty() {
            None
        } else {
            Some(diff)
        }
    }

    /// Resets the reference model and discards all bookkeeping.
    pub fn reset(&mut self) {
        self.model.reset();
        self.pending.clear();
        self.seq = 0;
        self.matches = 0;
        self.mismatches = 0;
        self.log.clear();
    }

    /// Resets only the reference model, as when the DUT sees a reset mid-run.
    pub fn reset_model(&mut self) {
        self.model.reset();
    }

    /// Checks structural invariants of the reference TLB.
    pub fn verify_tlb_state(&self) -> bool {
        let active = self.model.active_entries();
        let capacity = self.model.tlb_capacity();
        if active > capacity {
            error!("active TLB entries ({}) exceed capacity ({})", active, capacity);
            return false;
        }
        if self.model.tlb_write_index() >= capacity {
            error!("TLB write pointer out of range");
            return false;
        }
        true
    }

    pub fn matches(&self) -> u64 {
        self.matches
    }

    pub fn mismatches(&self) -> u64 {
        self.mismatches
    }

    /// Number of requests still waiting for a response.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Descriptions of every mismatch seen since the last reset.
    pub fn mismatch_log(&self) -> &[String] {
        &self.log
    }

    /// The shadow reference model.
    pub fn model(&self) -> &MemoryModel {
        &self.model
    }

    /// Logs a summary when any mismatch has been recorded.
    pub fn report(&self) {
        if self.mismatches == 0 {
            return;
        }
        info!(
            "scoreboard: {} matches, {} mismatches, {} pending",
            self.matches,
            self.mismatches,
            self.pending.len()
        );
        for line in &self.log {
            info!("  {}", line);
        }
    }
}
