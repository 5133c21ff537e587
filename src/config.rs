//! Configuration for the memory reference model and its command-line driver.
//!
//! `ModelConfig` is the parameter record of a single model instance. It is
//! immutable once a `MemoryModel` has been built from it. `Config` is the
//! top-level TOML document read by the binary.
//!
//! Numeric fields accept either integers or `"0x…"` hex strings.

use crate::common::bits::{ceil_log2, is_power_of_two};
use crate::common::ModelError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_VIRT_ADDR_WIDTH: u32 = 32;
const DEFAULT_PHYS_ADDR_WIDTH: u32 = 28;
const DEFAULT_PAGE_SIZE: u32 = 4096;
const DEFAULT_DATA_WIDTH: u32 = 64;
const DEFAULT_MEM_DEPTH: u32 = 16384;
const DEFAULT_TLB_ENTRIES: u32 = 256;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid model configuration: {0}")]
    Invalid(#[from] ModelError),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl Config {
    /// Parses and validates a TOML configuration string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.model.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Driver settings that do not affect model behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Log every transaction at `trace` level.
    #[serde(default)]
    pub trace_transactions: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_transactions: false,
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Parameters of one memory model instance.
///
/// Defaults match the RTL top-level parameters: 32-bit virtual and 28-bit
/// physical addresses, 4 KiB pages, 64-bit data, 16384 words and a 256-entry TLB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Width of the virtual address space in bits, `1..=64`.
    #[serde(default = "default_virt_addr_width", deserialize_with = "de_u32")]
    pub virt_addr_width: u32,

    /// Width of the physical address space in bits, `1..=64`.
    #[serde(default = "default_phys_addr_width", deserialize_with = "de_u32")]
    pub phys_addr_width: u32,

    /// Page size in bytes. Must be a power of two.
    #[serde(default = "default_page_size", deserialize_with = "de_u32")]
    pub page_size: u32,

    /// Data width in bits. Must be a multiple of 8, at most 64.
    #[serde(default = "default_data_width", deserialize_with = "de_u32")]
    pub data_width: u32,

    /// Number of addressable words in the backing store.
    #[serde(default = "default_mem_depth", deserialize_with = "de_u32")]
    pub mem_depth: u32,

    /// Number of translation entries in the TLB.
    #[serde(default = "default_tlb_entries", deserialize_with = "de_u32")]
    pub tlb_entries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            virt_addr_width: DEFAULT_VIRT_ADDR_WIDTH,
            phys_addr_width: DEFAULT_PHYS_ADDR_WIDTH,
            page_size: DEFAULT_PAGE_SIZE,
            data_width: DEFAULT_DATA_WIDTH,
            mem_depth: DEFAULT_MEM_DEPTH,
            tlb_entries: DEFAULT_TLB_ENTRIES,
        }
    }
}

impl ModelConfig {
    /// Checks every field, in the order the RTL elaboration checks apply.
    ///
    /// # Returns
    ///
    /// * `Unsupported` - data width is zero, not a multiple of 8, or above 64.
    /// * `BadArgument` - page size is not a power of two, the depth or TLB
    ///   capacity is zero, an address width is outside `1..=64`, or a page is
    ///   larger than either address space.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.data_width == 0 || self.data_width % 8 != 0 || self.data_width > 64 {
            return Err(ModelError::Unsupported(
                "data width must be a non-zero multiple of 8 no larger than 64",
            ));
        }
        if !is_power_of_two(self.page_size) {
            return Err(ModelError::BadArgument("page size must be a power of two"));
        }
        if self.mem_depth == 0 {
            return Err(ModelError::BadArgument("memory depth must be non-zero"));
        }
        if self.tlb_entries == 0 {
            return Err(ModelError::BadArgument("TLB capacity must be non-zero"));
        }
        if self.virt_addr_width == 0 || self.virt_addr_width > 64 {
            return Err(ModelError::BadArgument(
                "virtual address width must be in 1..=64",
            ));
        }
        if self.phys_addr_width == 0 || self.phys_addr_width > 64 {
            return Err(ModelError::BadArgument(
                "physical address width must be in 1..=64",
            ));
        }
        let offset_bits = self.page_offset_bits();
        if offset_bits > self.virt_addr_width || offset_bits > self.phys_addr_width {
            return Err(ModelError::BadArgument(
                "page size exceeds the address space",
            ));
        }
        Ok(())
    }

    /// Number of bytes in one data word.
    pub fn bytes_per_word(&self) -> u32 {
        self.data_width / 8
    }

    /// Number of page-offset bits (log2 of the page size).
    pub fn page_offset_bits(&self) -> u32 {
        ceil_log2(self.page_size)
    }
}

fn default_virt_addr_width() -> u32 {
    DEFAULT_VIRT_ADDR_WIDTH
}

fn default_phys_addr_width() -> u32 {
    DEFAULT_PHYS_ADDR_WIDTH
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_data_width() -> u32 {
    DEFAULT_DATA_WIDTH
}

fn default_mem_depth() -> u32 {
    DEFAULT_MEM_DEPTH
}

fn default_tlb_entries() -> u32 {
    DEFAULT_TLB_ENTRIES
}

/// Parses a hex string with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> Option<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(&digits.replace('_', ""), 16).ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrHex {
    Num(u64),
    Hex(String),
}

impl NumOrHex {
    fn value(self) -> Option<u64> {
        match self {
            NumOrHex::Num(n) => Some(n),
            NumOrHex::Hex(s) => parse_hex(&s),
        }
    }
}

/// Deserializes a `u64` given as an integer or a hex string.
pub(crate) fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    NumOrHex::deserialize(deserializer)?
        .value()
        .ok_or_else(|| serde::de::Error::custom("expected an integer or a hex string"))
}

/// Deserializes an optional `u64` given as an integer or a hex string.
pub(crate) fn de_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumOrHex>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) => v
            .value()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected an integer or a hex string")),
    }
}

pub(crate) fn de_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_u64(deserializer)?;
    u32::try_from(v).map_err(|_| serde::de::Error::custom("value does not fit in 32 bits"))
}
