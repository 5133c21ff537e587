//! Stimulus runner.
//!
//! Applies a stimulus to a scoreboard step by step. Each step is tagged with
//! its position as the request timestamp. Steps that carry an `expect` block
//! are checked against the reference; steps without one echo the reference
//! response, which still exercises the model and the pairing logic.

use super::scoreboard::Scoreboard;
use super::stimulus::{Expect, Step, Stimulus};
use super::transaction::MemoryTransaction;
use crate::common::Result;
use crate::config::ModelConfig;
use crate::stats::RunStats;
use tracing::{debug, info};

/// Runs `stimulus` against a fresh reference model built from `config`.
pub fn run(config: ModelConfig, stimulus: &Stimulus) -> Result<RunStats> {
    let mut scoreboard = Scoreboard::new(config)?;
    let mut stats = RunStats::default();

    info!(
        "running stimulus '{}' ({} steps)",
        stimulus.name,
        stimulus.steps.len()
    );

    for (i, step) in stimulus.steps.iter().enumerate() {
        let timestamp = i as u64;
        let (request, expect) = match *step {
            Step::TlbLoad {
                virt_base,
                phys_base,
                expect,
            } => (
                MemoryTransaction::tlb_load(timestamp, virt_base, phys_base),
                expect,
            ),
            Step::Read { addr, mask, expect } => {
                (MemoryTransaction::read(timestamp, addr, mask), expect)
            }
            Step::Write {
                addr,
                mask,
                data,
                expect,
            } => (MemoryTransaction::write(timestamp, addr, mask, data), expect),
            Step::Reset => {
                debug!("step {}: reset", i);
                scoreboard.reset_model();
                stats.resets += 1;
                continue;
            }
        };

        let expected = scoreboard.submit_request(&request);
        stats.record(request.op, expected.status);

        let observed = apply_expect(expected, expect);
        scoreboard.submit_response(&observed);
    }

    if !scoreboard.verify_tlb_state() {
        stats.invariant_violations += 1;
    }
    scoreboard.model().dump_state();
    scoreboard.report();

    stats.matches = scoreboard.matches();
    stats.mismatches = scoreboard.mismatches();
    stats.mismatch_log = scoreboard.mismatch_log().to_vec();
    Ok(stats)
}

fn apply_expect(mut response: MemoryTransaction, expect: Option<Expect>) -> MemoryTransaction {
    if let Some(expect) = expect {
        if let Some(status) = expect.status {
            response.status = status;
        }
        if let Some(data) = expect.data {
            response.data = data;
        }
    }
    response
}
