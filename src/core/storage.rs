//! Backing store.
//!
//! A flat, zero-initialised byte array of `depth * bytes_per_word` bytes.
//! Words are little-endian: byte lane `i` of a word lives at
//! `index * bytes_per_word + i` and carries bits `8*i..8*i+8` of the value.

use crate::common::{ModelError, Result};

/// Word-addressed byte storage with per-lane enables.
pub struct BackingStore {
    bytes: Vec<u8>,
    bytes_per_word: usize,
    depth: usize,
}

impl BackingStore {
    /// Allocates a zeroed store.
    ///
    /// # Arguments
    ///
    /// * `depth` - Number of words.
    /// * `bytes_per_word` - Width of each word in bytes.
    ///
    /// # Returns
    ///
    /// `Unsupported` if the byte count overflows `usize`, `OutOfMemory` if the
    /// allocation fails.
    pub fn new(depth: usize, bytes_per_word: usize) -> Result<Self> {
        let total = depth
            .checked_mul(bytes_per_word)
            .ok_or(ModelError::Unsupported("backing store size overflows"))?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(total)
            .map_err(|_| ModelError::OutOfMemory)?;
        bytes.resize(total, 0);

        Ok(Self {
            bytes,
            bytes_per_word,
            depth,
        })
    }

    /// Assembles the word at `index` from the lanes enabled in `lanes`.
    ///
    /// Disabled lanes contribute zero. The caller guarantees `index < depth`.
    pub fn read_word(&self, index: usize, lanes: u32) -> u64 {
        let word = self.word(index);
        word.iter()
            .enumerate()
            .filter(|(lane, _)| lanes & (1 << lane) != 0)
            .fold(0u64, |acc, (lane, &byte)| acc | (u64::from(byte) << (lane * 8)))
    }

    /// Stores the lanes of `value` enabled in `lanes` into the word at `index`.
    ///
    /// Disabled lanes keep their previous contents.
    pub fn write_word(&mut self, index: usize, lanes: u32, value: u64) {
        let start = index * self.bytes_per_word;
        let word = &mut self.bytes[start..start + self.bytes_per_word];
        for (lane, byte) in word.iter_mut().enumerate() {
            if lanes & (1 << lane) != 0 {
                *byte = (value >> (lane * 8)) as u8;
            }
        }
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Number of words.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the store holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn word(&self, index: usize) -> &[u8] {
        let start = index * self.bytes_per_word;
        &self.bytes[start..start + self.bytes_per_word]
    }
}
