//! Thread-safe handle to a memory model.
//!
//! The engine itself has no internal locking. Callers that drive one model
//! from several threads (for example, several simulation instances sharing a
//! shadow of the same memory) go through `SharedModel`, which takes a single
//! lock around each operation so that every call sees the complete effects of
//! the previous one.

use super::model::MemoryModel;
use crate::common::{ModelError, ReadResult, Result, Status, TranslationResult};
use crate::config::ModelConfig;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, lock-protected memory model.
#[derive(Clone)]
pub struct SharedModel {
    inner: Arc<Mutex<MemoryModel>>,
}

impl SharedModel {
    /// Wraps an existing model.
    pub fn new(model: MemoryModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
        }
    }

    /// Builds a model (defaults when `config` is `None`) and wraps it.
    pub fn create(config: Option<ModelConfig>) -> Result<Self> {
        MemoryModel::create(config).map(Self::new)
    }

    // A panic while holding the lock leaves the model in an unknown state;
    // treat it as an invalid handle rather than guess at its contents.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryModel>> {
        self.inner
            .lock()
            .map_err(|_| ModelError::BadArgument("model lock poisoned"))
    }

    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset();
        Ok(())
    }

    pub fn load_tlb(&self, virt_base: u64, phys_base: u64) -> Result<usize> {
        Ok(self.lock()?.load_tlb(virt_base, phys_base))
    }

    pub fn translate(&self, virt_addr: u64) -> Result<TranslationResult> {
        Ok(self.lock()?.translate(virt_addr))
    }

    pub fn read(&self, virt_addr: u64, byte_mask: u32) -> Result<ReadResult> {
        Ok(self.lock()?.read(virt_addr, byte_mask))
    }

    pub fn write(&self, virt_addr: u64, byte_mask: u32, data: u64) -> Result<Status> {
        Ok(self.lock()?.write(virt_addr, byte_mask, data))
    }

    pub fn active_entries(&self) -> Result<u32> {
        Ok(self.lock()?.active_entries())
    }

    pub fn tlb_write_index(&self) -> Result<u32> {
        Ok(self.lock()?.tlb_write_index())
    }

    pub fn config(&self) -> Result<ModelConfig> {
        Ok(*self.lock()?.config())
    }

    /// Runs `f` with exclusive access, for multi-step sequences that must not
    /// interleave with other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut MemoryModel) -> R) -> Result<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
