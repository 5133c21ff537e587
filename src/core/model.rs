//! Translation & Storage Engine.
//!
//! `MemoryModel` is the golden reference for the memory unit: a round-robin
//! TLB in front of a byte-addressable backing store. Given the same stimulus
//! as the RTL it must produce bit-identical responses, including the error
//! responses, so nothing here clamps, wraps or otherwise repairs an invalid
//! request.
//!
//! Every operation is synchronous and completes before returning. Concurrent
//! callers must serialise access externally (see `SharedModel`).

use super::storage::BackingStore;
use super::tlb::{Tlb, TlbEntry};
use crate::common::bits::{byte_mask_for_word, ceil_log2, is_power_of_two, mask_from_width};
use crate::common::{
    AccessType, ModelError, PhysAddr, ReadResult, Result, Status, TranslationResult, VirtAddr,
};
use crate::config::ModelConfig;
use tracing::{debug, trace};

/// Reference model of the memory unit.
pub struct MemoryModel {
    cfg: ModelConfig,
    tlb: Tlb,
    store: BackingStore,

    bytes_per_word: u32,
    page_offset_bits: u32,
    mem_depth_pow2: bool,

    virt_addr_mask: u64,
    phys_addr_mask: u64,
    page_offset_mask: u64,
    mem_addr_mask: u64,
    data_mask: u64,
    /// Byte-enable mask covering a full word.
    word_lanes: u32,
}

impl MemoryModel {
    /// Builds a model, substituting the default configuration when `config`
    /// is `None`.
    ///
    /// # Returns
    ///
    /// The reset model, or the first configuration/allocation error. No
    /// partially built model is ever returned.
    pub fn create(config: Option<ModelConfig>) -> Result<Self> {
        Self::new(config.unwrap_or_default())
    }

    /// Builds a model from an explicit configuration.
    pub fn new(cfg: ModelConfig) -> Result<Self> {
        cfg.validate()?;

        let bytes_per_word = cfg.bytes_per_word();
        let page_offset_bits = cfg.page_offset_bits();
        let mem_depth_pow2 = is_power_of_two(cfg.mem_depth);
        let mem_addr_mask = if mem_depth_pow2 {
            u64::from(cfg.mem_depth) - 1
        } else {
            mask_from_width(ceil_log2(cfg.mem_depth))
        };

        let depth = usize::try_from(cfg.mem_depth)
            .map_err(|_| ModelError::Unsupported("memory depth exceeds the host address space"))?;
        let store = BackingStore::new(depth, bytes_per_word as usize)?;

        let capacity = usize::try_from(cfg.tlb_entries)
            .map_err(|_| ModelError::Unsupported("TLB capacity exceeds the host address space"))?;
        let tlb = Tlb::new(capacity).ok_or(ModelError::OutOfMemory)?;

        let mut model = Self {
            cfg,
            tlb,
            store,
            bytes_per_word,
            page_offset_bits,
            mem_depth_pow2,
            virt_addr_mask: mask_from_width(cfg.virt_addr_width),
            phys_addr_mask: mask_from_width(cfg.phys_addr_width),
            page_offset_mask: mask_from_width(page_offset_bits),
            mem_addr_mask,
            data_mask: mask_from_width(cfg.data_width),
            word_lanes: byte_mask_for_word(bytes_per_word),
        };
        model.reset();

        debug!(
            virt_addr_width = cfg.virt_addr_width,
            phys_addr_width = cfg.phys_addr_width,
            page_size = cfg.page_size,
            data_width = cfg.data_width,
            mem_depth = cfg.mem_depth,
            tlb_entries = cfg.tlb_entries,
            "memory model created"
        );
        Ok(model)
    }

    /// Returns memory contents and translation state to power-on defaults.
    ///
    /// Every byte of the backing store and every TLB slot is zeroed; the write
    /// pointer and active count return to 0. The configuration is kept.
    pub fn reset(&mut self) {
        self.store.clear();
        self.tlb.clear();
        debug!("memory model reset");
    }

    /// Loads a virtual-to-physical mapping into the TLB.
    ///
    /// Both bases are truncated to their address widths before being stored.
    /// The slot under the round-robin pointer is overwritten whether or not it
    /// held a mapping; no overlap checking is done.
    ///
    /// # Returns
    ///
    /// The slot index that received the mapping.
    pub fn load_tlb(&mut self, virt_base: u64, phys_base: u64) -> usize {
        let virt_base = virt_base & self.virt_addr_mask;
        let phys_base = phys_base & self.phys_addr_mask;
        let slot = self.tlb.insert(virt_base, phys_base);
        debug!(
            slot,
            "tlb load {:#x} -> {:#x} (active={}, next={})",
            virt_base,
            phys_base,
            self.tlb.active(),
            self.tlb.write_ptr()
        );
        slot
    }

    /// Translates a virtual address without touching the backing store.
    ///
    /// The physical address takes its page number from the matching entry's
    /// physical base and its offset from the virtual address, masked to the
    /// physical width. A miss reports `ErrAddr` with a zero address.
    pub fn translate(&self, virt_addr: u64) -> TranslationResult {
        let vaddr = VirtAddr::new(virt_addr).masked(self.virt_addr_mask);
        let vpn = vaddr.page_number(self.page_offset_bits);
        let offset = vaddr.page_offset(self.page_offset_mask);

        match self.tlb.lookup(vpn, self.page_offset_bits) {
            Some(entry) => {
                let base = PhysAddr::new(entry.phys_base).masked(self.phys_addr_mask);
                let paddr = PhysAddr::new(base.page_base(self.page_offset_mask) | offset)
                    .masked(self.phys_addr_mask);
                TranslationResult::hit(paddr)
            }
            None => {
                trace!("translation miss at {}", vaddr);
                TranslationResult::miss()
            }
        }
    }

    /// Issues a masked read.
    ///
    /// A zero `byte_mask` reads the full word. Lanes outside the mask read as
    /// zero regardless of what is stored.
    ///
    /// # Returns
    ///
    /// * `ErrAccess` - mask selects lanes beyond the word, or the physical
    ///   index is beyond a non-power-of-two depth.
    /// * `ErrAddr` - translation miss.
    pub fn read(&self, virt_addr: u64, byte_mask: u32) -> ReadResult {
        let result = self.do_read(virt_addr, byte_mask);
        trace!(
            "read {:#x} mask={:#04x} -> {} data={:#x}",
            virt_addr,
            byte_mask,
            result.status,
            result.data
        );
        result
    }

    fn do_read(&self, virt_addr: u64, byte_mask: u32) -> ReadResult {
        if let Err(status) = self.check_mask(byte_mask, AccessType::Read) {
            return ReadResult::fault(status);
        }
        let lanes = if byte_mask == 0 {
            self.word_lanes
        } else {
            byte_mask
        };

        let index = match self.word_index(virt_addr) {
            Ok(index) => index,
            Err(status) => return ReadResult::fault(status),
        };

        ReadResult::ok(self.store.read_word(index, lanes) & self.data_mask)
    }

    /// Issues a masked write.
    ///
    /// Only lanes enabled in `byte_mask` are stored; a zero mask writes
    /// nothing and succeeds once the address translates.
    ///
    /// # Returns
    ///
    /// * `ErrWrite` - mask selects lanes beyond the word.
    /// * `ErrAddr` - translation miss.
    /// * `ErrAccess` - physical index beyond a non-power-of-two depth.
    pub fn write(&mut self, virt_addr: u64, byte_mask: u32, data: u64) -> Status {
        let status = self.do_write(virt_addr, byte_mask, data);
        trace!(
            "write {:#x} mask={:#04x} data={:#x} -> {}",
            virt_addr,
            byte_mask,
            data,
            status
        );
        status
    }

    fn do_write(&mut self, virt_addr: u64, byte_mask: u32, data: u64) -> Status {
        if let Err(status) = self.check_mask(byte_mask, AccessType::Write) {
            return status;
        }

        let translation = self.translate(virt_addr);
        if !translation.is_hit() {
            return translation.status;
        }
        if byte_mask == 0 {
            return Status::Ok;
        }

        let index = match self.physical_index(translation.paddr) {
            Ok(index) => index,
            Err(status) => return status,
        };

        self.store
            .write_word(index, byte_mask, data & self.data_mask);
        Status::Ok
    }

    fn check_mask(&self, byte_mask: u32, access: AccessType) -> std::result::Result<(), Status> {
        if byte_mask & !self.word_lanes != 0 {
            return Err(access.mask_fault());
        }
        Ok(())
    }

    fn word_index(&self, virt_addr: u64) -> std::result::Result<usize, Status> {
        let translation = self.translate(virt_addr);
        if !translation.is_hit() {
            return Err(translation.status);
        }
        self.physical_index(translation.paddr)
    }

    // The physical address selects a word directly; only a non-power-of-two
    // depth can produce an index the mask does not already bound.
    fn physical_index(&self, paddr: PhysAddr) -> std::result::Result<usize, Status> {
        let index = paddr.val() & self.mem_addr_mask;
        if !self.mem_depth_pow2 && index >= u64::from(self.cfg.mem_depth) {
            return Err(Status::ErrAccess);
        }
        usize::try_from(index).map_err(|_| Status::ErrAccess)
    }

    /// Number of valid TLB entries.
    pub fn active_entries(&self) -> u32 {
        self.tlb.active() as u32
    }

    /// Slot the next `load_tlb` will overwrite.
    pub fn tlb_write_index(&self) -> u32 {
        self.tlb.write_ptr() as u32
    }

    /// Configured TLB capacity.
    pub fn tlb_capacity(&self) -> u32 {
        self.cfg.tlb_entries
    }

    /// Configuration the model was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.cfg
    }

    /// Bytes per data word.
    pub fn bytes_per_word(&self) -> u32 {
        self.bytes_per_word
    }

    /// Page-offset bit count.
    pub fn page_offset_bits(&self) -> u32 {
        self.page_offset_bits
    }

    /// Mask applied to every data value.
    pub fn data_mask(&self) -> u64 {
        self.data_mask
    }

    /// Byte-enable mask covering a full word.
    pub fn full_byte_mask(&self) -> u32 {
        self.word_lanes
    }

    /// Read-only view of the TLB slots.
    pub fn tlb_entries(&self) -> &[TlbEntry] {
        self.tlb.entries()
    }

    /// Size of the backing store in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.store.len()
    }

    /// Logs the valid TLB slots at debug level.
    pub fn dump_state(&self) {
        debug!(
            "tlb state: {}/{} active, next slot {}",
            self.tlb.active(),
            self.tlb.capacity(),
            self.tlb.write_ptr()
        );
        for (slot, entry) in self.tlb.entries().iter().enumerate() {
            if entry.valid {
                debug!(
                    "  [{:3}] {:#x} -> {:#x}",
                    slot, entry.virt_base, entry.phys_base
                );
            }
        }
    }
}

impl std::fmt::Debug for MemoryModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryModel")
            .field("config", &self.cfg)
            .field("active_entries", &self.tlb.active())
            .field("tlb_write_ptr", &self.tlb.write_ptr())
            .finish_non_exhaustive()
    }
}
