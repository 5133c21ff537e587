//! Stimulus programs.
//!
//! A stimulus is an ordered list of steps applied to the memory unit. Steps
//! may carry the response the design under test produced for them; the
//! runner feeds those to the scoreboard as the observed response.
//!
//! File format (JSON):
//!
//! ```json
//! {
//!   "name": "smoke",
//!   "steps": [
//!     { "op": "tlb_load", "virt_base": "0x1000", "phys_base": "0x2000" },
//!     { "op": "write", "addr": "0x1020", "mask": "0xff", "data": "0x1122334455667788" },
//!     { "op": "read", "addr": "0x1020", "mask": 255,
//!       "expect": { "status": "ok", "data": "0x1122334455667788" } },
//!     { "op": "reset" }
//!   ]
//! }
//! ```

use crate::common::Status;
use crate::config::{de_opt_u64, de_u32, de_u64};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a stimulus file.
#[derive(Debug, Error)]
pub enum StimulusError {
    #[error("failed to read stimulus '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stimulus: {0}")]
    Json(#[from] serde_json::Error),
}

/// Response observed from the design under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Expect {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub data: Option<u64>,
}

/// One stimulus step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    TlbLoad {
        #[serde(deserialize_with = "de_u64")]
        virt_base: u64,
        #[serde(deserialize_with = "de_u64")]
        phys_base: u64,
        #[serde(default)]
        expect: Option<Expect>,
    },
    Read {
        #[serde(deserialize_with = "de_u64")]
        addr: u64,
        #[serde(deserialize_with = "de_u32")]
        mask: u32,
        #[serde(default)]
        expect: Option<Expect>,
    },
    Write {
        #[serde(deserialize_with = "de_u64")]
        addr: u64,
        #[serde(deserialize_with = "de_u32")]
        mask: u32,
        #[serde(deserialize_with = "de_u64")]
        data: u64,
        #[serde(default)]
        expect: Option<Expect>,
    },
    /// Resets the reference model, mirroring a DUT reset.
    Reset,
}

/// A named list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stimulus {
    #[serde(default = "default_name")]
    pub name: String,
    pub steps: Vec<Step>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Stimulus {
    /// Parses a stimulus from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, StimulusError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses a stimulus file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StimulusError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StimulusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The basic bring-up scenario, with the responses the RTL produces under
    /// the default configuration.
    ///
    /// Phases: TLB load, basic write, basic read, masked write to an unmapped
    /// page, sequential read-after-write, translation-miss handling.
    pub fn builtin() -> Self {
        let ok = |data: Option<u64>| {
            Some(Expect {
                status: Some(Status::Ok),
                data,
            })
        };
        let miss = |data: Option<u64>| {
            Some(Expect {
                status: Some(Status::ErrAddr),
                data,
            })
        };

        let mut steps = vec![
            Step::TlbLoad {
                virt_base: 0x1000,
                phys_base: 0x2000,
                expect: ok(None),
            },
            Step::TlbLoad {
                virt_base: 0x3000,
                phys_base: 0x4000,
                expect: ok(None),
            },
            Step::Write {
                addr: 0x1000,
                mask: 0xFF,
                data: 0x1234_5678_9ABC_DEF0,
                expect: ok(None),
            },
            Step::Write {
                addr: 0x1008,
                mask: 0x0F,
                data: 0x1122_3344,
                expect: ok(None),
            },
            Step::Read {
                addr: 0x1000,
                mask: 0xFF,
                expect: ok(Some(0x1234_5678_9ABC_DEF0)),
            },
            Step::Read {
                addr: 0x1008,
                mask: 0xFF,
                expect: ok(Some(0x1122_3344)),
            },
            Step::Write {
                addr: 0x2000,
                mask: 0xF0,
                data: 0xFFFF_FFFF_0000_0000,
                expect: miss(None),
            },
            Step::Write {
                addr: 0x2000,
                mask: 0x0F,
                data: 0x0000_0000_FFFF_FFFF,
                expect: miss(None),
            },
            Step::Read {
                addr: 0x2000,
                mask: 0xFF,
                expect: miss(Some(0)),
            },
        ];

        for i in 0..4u64 {
            let addr = 0x3000 + i * 8;
            let data = 0x100 | i;
            steps.push(Step::Write {
                addr,
                mask: 0xFF,
                data,
                expect: ok(None),
            });
            steps.push(Step::Read {
                addr,
                mask: 0xFF,
                expect: ok(Some(data)),
            });
        }

        steps.push(Step::Read {
            addr: 0x5000,
            mask: 0xFF,
            expect: miss(Some(0)),
        });
        steps.push(Step::Write {
            addr: 0x5000,
            mask: 0xFF,
            data: 0x1234_5678_90AB_CDEF,
            expect: miss(None),
        });

        Self {
            name: "builtin".to_string(),
            steps,
        }
    }
}
