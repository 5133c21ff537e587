//! Translation Lookaside Buffer (TLB).
//!
//! A fully associative table of virtual-to-physical page mappings with the
//! replacement behaviour of the RTL:
//! 1. **Insertion:** round-robin. Each insert overwrites the slot under the
//!    write pointer and advances it, wrapping at capacity. Eviction order is
//!    insertion order; lookups never refresh an entry.
//! 2. **Lookup:** linear scan from slot 0. The lowest-index valid entry whose
//!    page number matches wins, so duplicate mappings resolve by slot index,
//!    not by recency.
//!
//! The table stores addresses already truncated to their widths; page-number
//! extraction is done by the caller-supplied offset bit count.

/// A single entry in the TLB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TlbEntry {
    /// Entry validity flag.
    pub valid: bool,
    /// Virtual base address. Only the page-number bits are significant.
    pub virt_base: u64,
    /// Physical base address. Only the page-number bits are significant.
    pub phys_base: u64,
}

/// Fixed-capacity round-robin TLB.
pub struct Tlb {
    /// Slot array, indexed `0..capacity`.
    entries: Vec<TlbEntry>,
    /// Next slot to receive an inserted mapping.
    write_ptr: usize,
    /// Number of valid slots.
    active: usize,
}

impl Tlb {
    /// Creates an empty TLB with `capacity` slots.
    ///
    /// Returns `None` if the slot array cannot be allocated.
    pub fn new(capacity: usize) -> Option<Self> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(capacity).ok()?;
        entries.resize(capacity, TlbEntry::default());
        Some(Self {
            entries,
            write_ptr: 0,
            active: 0,
        })
    }

    /// Inserts a mapping at the write pointer and advances it.
    ///
    /// The previous occupant of the slot is discarded unconditionally.
    ///
    /// # Arguments
    ///
    /// * `virt_base` - Virtual base, already masked to the virtual width.
    /// * `phys_base` - Physical base, already masked to the physical width.
    ///
    /// # Returns
    ///
    /// The slot index that was written.
    pub fn insert(&mut self, virt_base: u64, phys_base: u64) -> usize {
        let index = self.write_ptr;
        let slot = &mut self.entries[index];

        let was_valid = slot.valid;
        *slot = TlbEntry {
            valid: true,
            virt_base,
            phys_base,
        };

        if !was_valid && self.active < self.entries.len() {
            self.active += 1;
        }

        self.write_ptr = if index + 1 < self.entries.len() {
            index + 1
        } else {
            0
        };
        index
    }

    /// Looks up a virtual page number.
    ///
    /// # Arguments
    ///
    /// * `vpn` - The virtual page number to look up.
    /// * `offset_bits` - Page-offset bit count used to derive each entry's page number.
    ///
    /// # Returns
    ///
    /// The first matching valid entry in index order, if any.
    pub fn lookup(&self, vpn: u64, offset_bits: u32) -> Option<&TlbEntry> {
        self.entries.iter().find(|entry| {
            entry.valid && entry.virt_base.checked_shr(offset_bits).unwrap_or(0) == vpn
        })
    }

    /// Invalidates every slot and rewinds the write pointer.
    pub fn clear(&mut self) {
        self.entries.fill(TlbEntry::default());
        self.write_ptr = 0;
        self.active = 0;
    }

    /// Number of valid slots.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Slot that the next insertion will overwrite.
    pub fn write_ptr(&self) -> usize {
        self.write_ptr
    }

    /// Configured number of slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Read-only view of the slot array.
    pub fn entries(&self) -> &[TlbEntry] {
        &self.entries
    }
}
