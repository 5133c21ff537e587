//! Physical and Virtual Address types.
//!
//! Strong types for the two address spaces of the memory unit. Widths are not
//! fixed: every page/offset helper takes the bit counts derived from the model
//! configuration, so the same types serve a 1-bit and a 64-bit address space.

/// A virtual address presented to the memory unit.
///
/// Virtual addresses must be translated through the TLB before they can
/// select a word in the backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address produced by a successful translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }

    /// Truncates the address to the configured virtual width.
    ///
    /// # Arguments
    ///
    /// * `mask` - Low-N-bits mask of the virtual address width.
    #[inline(always)]
    pub fn masked(self, mask: u64) -> Self {
        Self(self.0 & mask)
    }

    /// Extracts the virtual page number.
    ///
    /// # Arguments
    ///
    /// * `offset_bits` - Number of page-offset bits (log2 of the page size).
    #[inline(always)]
    pub fn page_number(&self, offset_bits: u32) -> u64 {
        shr(self.0, offset_bits)
    }

    /// Extracts the byte offset within the page.
    #[inline(always)]
    pub fn page_offset(&self, offset_mask: u64) -> u64 {
        self.0 & offset_mask
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }

    /// Truncates the address to the configured physical width.
    #[inline(always)]
    pub fn masked(self, mask: u64) -> Self {
        Self(self.0 & mask)
    }

    /// Returns the page-aligned base, discarding the offset bits.
    #[inline(always)]
    pub fn page_base(&self, offset_mask: u64) -> u64 {
        self.0 & !offset_mask
    }
}

impl std::fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// A page the size of the whole 64-bit space leaves no page-number bits.
#[inline(always)]
fn shr(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}
