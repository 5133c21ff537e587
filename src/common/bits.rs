//! Bit-mask derivation helpers.
//!
//! All address and data manipulation in the model happens on plain `u64`
//! values with masks computed once at construction. These helpers produce
//! those masks without ever shifting by the full register width.

/// Returns the low-`width`-bits mask.
///
/// A width of 0 yields 0 and any width of 64 or more yields all ones.
///
/// # Examples
///
/// ```
/// use memory_refmodel::common::bits::mask_from_width;
/// assert_eq!(mask_from_width(12), 0xFFF);
/// assert_eq!(mask_from_width(64), u64::MAX);
/// ```
#[inline]
pub fn mask_from_width(width: u32) -> u64 {
    match width {
        0 => 0,
        w if w >= 64 => u64::MAX,
        w => (1u64 << w) - 1,
    }
}

/// Returns the number of bits needed to index `value` distinct items.
///
/// Values 0 and 1 need no index bits.
#[inline]
pub fn ceil_log2(value: u32) -> u32 {
    if value <= 1 {
        return 0;
    }
    u32::BITS - (value - 1).leading_zeros()
}

/// Returns true for a non-zero power of two.
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value != 0 && value & (value - 1) == 0
}

/// Returns the byte-enable mask covering every byte of a word.
///
/// Saturates to all ones for words of 32 bytes or more.
#[inline]
pub fn byte_mask_for_word(bytes_per_word: u32) -> u32 {
    match bytes_per_word {
        0 => 0,
        b if b >= 32 => u32::MAX,
        b => (1u32 << b) - 1,
    }
}
