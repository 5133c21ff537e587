//! Run statistics collection and reporting.
//!
//! Tracks how many transactions of each kind were applied, how the reference
//! model answered them, and how the scoreboard judged the observed responses.

use crate::common::Status;
use crate::sim::transaction::OpType;
use std::time::Instant;

/// Statistics for one stimulus run.
pub struct RunStats {
    start_time: Instant,

    pub reads: u64,
    pub writes: u64,
    pub tlb_loads: u64,
    pub resets: u64,

    pub status_ok: u64,
    pub status_err_addr: u64,
    pub status_err_access: u64,
    pub status_err_write: u64,

    pub matches: u64,
    pub mismatches: u64,
    pub invariant_violations: u64,

    pub mismatch_log: Vec<String>,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            reads: 0,
            writes: 0,
            tlb_loads: 0,
            resets: 0,
            status_ok: 0,
            status_err_addr: 0,
            status_err_access: 0,
            status_err_write: 0,
            matches: 0,
            mismatches: 0,
            invariant_violations: 0,
            mismatch_log: Vec::new(),
        }
    }
}

impl RunStats {
    /// Counts one transaction and the status the reference model gave it.
    pub fn record(&mut self, op: OpType, status: Status) {
        match op {
            OpType::Read => self.reads += 1,
            OpType::Write => self.writes += 1,
            OpType::TlbLoad => self.tlb_loads += 1,
        }
        match status {
            Status::Ok => self.status_ok += 1,
            Status::ErrAddr => self.status_err_addr += 1,
            Status::ErrAccess => self.status_err_access += 1,
            Status::ErrWrite => self.status_err_write += 1,
            Status::Pending => {}
        }
    }

    /// Total transactions applied (resets excluded).
    pub fn transactions(&self) -> u64 {
        self.reads + self.writes + self.tlb_loads
    }

    /// True when every response matched and no invariant was violated.
    pub fn passed(&self) -> bool {
        self.mismatches == 0 && self.invariant_violations == 0
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();

        println!("\n==========================================================");
        println!("MEMORY REFERENCE MODEL STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("transactions             {}", self.transactions());
        println!("  reads                  {}", self.reads);
        println!("  writes                 {}", self.writes);
        println!("  tlb_loads              {}", self.tlb_loads);
        println!("resets                   {}", self.resets);
        println!("----------------------------------------------------------");
        println!("status.MEM_OK            {}", self.status_ok);
        println!("status.MEM_ERR_ADDR      {}", self.status_err_addr);
        println!("status.MEM_ERR_ACCESS    {}", self.status_err_access);
        println!("status.MEM_ERR_WRITE     {}", self.status_err_write);
        println!("----------------------------------------------------------");
        println!("scoreboard.matches       {}", self.matches);
        println!("scoreboard.mismatches    {}", self.mismatches);
        println!("invariant_violations     {}", self.invariant_violations);
        for line in &self.mismatch_log {
            println!("  ! {}", line);
        }
        println!("==========================================================");
        println!("RESULT                   {}", if self.passed() { "PASS" } else { "FAIL" });
    }
}
