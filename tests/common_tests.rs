//! Integration tests for common utilities module.

use memory_refmodel::common::bits::{byte_mask_for_word, ceil_log2, is_power_of_two, mask_from_width};
use memory_refmodel::common::*;

/// Tests virtual address creation.
#[test]
fn test_virt_addr_creation() {
    let addr = VirtAddr::new(0x8000_0000);
    assert_eq!(addr.val(), 0x8000_0000);
}

/// Tests page number and offset extraction for a configurable page size.
#[test]
fn test_virt_addr_page_split() {
    let addr = VirtAddr::new(0x8000_1234);
    assert_eq!(addr.page_offset(0xFFF), 0x234);
    assert_eq!(addr.page_number(12), 0x8_0001);

    assert_eq!(addr.page_offset(0xFF), 0x34);
    assert_eq!(addr.page_number(8), 0x80_0012);
}

/// Tests truncation to an address width.
#[test]
fn test_addr_masking() {
    let addr = VirtAddr::new(0xDEAD_BEEF_1234).masked(mask_from_width(16));
    assert_eq!(addr.val(), 0x1234);

    let paddr = PhysAddr::new(0x1234_5678).masked(mask_from_width(28));
    assert_eq!(paddr.val(), 0x0234_5678);
    assert_eq!(paddr.page_base(0xFFF), 0x0234_5000);
}

/// Tests address display formatting.
#[test]
fn test_addr_display() {
    assert_eq!(format!("{}", VirtAddr::new(0x1000)), "0x1000");
    assert_eq!(format!("{}", PhysAddr::new(0)), "0x0");
}

/// Tests the width-to-mask helper at its boundaries.
#[test]
fn test_mask_from_width() {
    assert_eq!(mask_from_width(0), 0);
    assert_eq!(mask_from_width(1), 1);
    assert_eq!(mask_from_width(28), 0x0FFF_FFFF);
    assert_eq!(mask_from_width(63), u64::MAX >> 1);
    assert_eq!(mask_from_width(64), u64::MAX);
    assert_eq!(mask_from_width(200), u64::MAX);
}

/// Tests ceiling log2, including non-powers of two.
#[test]
fn test_ceil_log2() {
    assert_eq!(ceil_log2(0), 0);
    assert_eq!(ceil_log2(1), 0);
    assert_eq!(ceil_log2(2), 1);
    assert_eq!(ceil_log2(3), 2);
    assert_eq!(ceil_log2(4096), 12);
    assert_eq!(ceil_log2(4097), 13);
    assert_eq!(ceil_log2(100), 7);
    assert_eq!(ceil_log2(u32::MAX), 32);
}

/// Tests the power-of-two predicate.
#[test]
fn test_is_power_of_two() {
    assert!(!is_power_of_two(0));
    assert!(is_power_of_two(1));
    assert!(is_power_of_two(4096));
    assert!(!is_power_of_two(4095));
    assert!(is_power_of_two(1 << 31));
}

/// Tests the full-word byte-enable mask.
#[test]
fn test_byte_mask_for_word() {
    assert_eq!(byte_mask_for_word(0), 0);
    assert_eq!(byte_mask_for_word(1), 0x1);
    assert_eq!(byte_mask_for_word(4), 0xF);
    assert_eq!(byte_mask_for_word(8), 0xFF);
    assert_eq!(byte_mask_for_word(32), u32::MAX);
}

/// Tests that status codes match the RTL encoding in both directions.
#[test]
fn test_status_codes() {
    assert_eq!(Status::Ok.code(), 0x0);
    assert_eq!(Status::ErrAddr.code(), 0x1);
    assert_eq!(Status::ErrAccess.code(), 0x2);
    assert_eq!(Status::ErrWrite.code(), 0x3);
    assert_eq!(Status::Pending.code(), 0xF);

    for status in [
        Status::Ok,
        Status::ErrAddr,
        Status::ErrAccess,
        Status::ErrWrite,
        Status::Pending,
    ] {
        assert_eq!(Status::from_code(status.code()), Some(status));
    }
    assert_eq!(Status::from_code(0x4), None);
    assert_eq!(Status::from_code(0xE), None);
}

/// Tests status display names.
#[test]
fn test_status_display() {
    assert_eq!(format!("{}", Status::Ok), "MEM_OK");
    assert_eq!(format!("{}", Status::ErrAddr), "MEM_ERR_ADDR");
    assert_eq!(format!("{}", Status::Pending), "MEM_PENDING");
}

/// Tests that a malformed mask maps to a different status per access type.
#[test]
fn test_access_type_mask_fault() {
    assert_eq!(AccessType::Read.mask_fault(), Status::ErrAccess);
    assert_eq!(AccessType::Write.mask_fault(), Status::ErrWrite);
}

/// Tests translation result constructors.
#[test]
fn test_translation_result() {
    let hit = TranslationResult::hit(PhysAddr::new(0x2000));
    assert!(hit.is_hit());
    assert_eq!(hit.paddr.val(), 0x2000);

    let miss = TranslationResult::miss();
    assert!(!miss.is_hit());
    assert_eq!(miss.status, Status::ErrAddr);
    assert_eq!(miss.paddr.val(), 0);
}

/// Tests read result constructors.
#[test]
fn test_read_result() {
    let ok = ReadResult::ok(0x1234);
    assert_eq!(ok.status, Status::Ok);
    assert_eq!(ok.data, 0x1234);

    let fault = ReadResult::fault(Status::ErrAccess);
    assert_eq!(fault.status, Status::ErrAccess);
    assert_eq!(fault.data, 0);
}

/// Tests management error codes and messages.
#[test]
fn test_model_error_codes() {
    assert_eq!(ModelError::BadArgument("x").code(), -1);
    assert_eq!(ModelError::OutOfMemory.code(), -2);
    assert_eq!(ModelError::Unsupported("y").code(), -3);

    let s = format!("{}", ModelError::BadArgument("page size must be a power of two"));
    assert!(s.contains("bad argument"));
    assert!(s.contains("page size"));
}
