//! Property tests for the translation & storage engine.

use memory_refmodel::common::bits::mask_from_width;
use memory_refmodel::{MemoryModel, ModelConfig, Status};
use proptest::prelude::*;

const PAGE: u64 = 4096;

fn lane_mask(mask: u32) -> u64 {
    (0..8)
        .filter(|lane| mask & (1 << lane) != 0)
        .fold(0u64, |acc, lane| acc | (0xFFu64 << (lane * 8)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A masked write replaces exactly the enabled lanes of a word.
    #[test]
    fn prop_masked_write_round_trip(
        word in 0u64..2048,
        old in any::<u64>(),
        new in any::<u64>(),
        mask in 0u32..=0xFF,
    ) {
        let mut model = MemoryModel::create(None).unwrap();
        model.load_tlb(0x0, 0x0);
        let addr = word * 8 % PAGE;

        prop_assert_eq!(model.write(addr, 0xFF, old), Status::Ok);
        prop_assert_eq!(model.write(addr, mask, new), Status::Ok);

        let lanes = lane_mask(mask);
        let result = model.read(addr, 0);
        prop_assert_eq!(result.status, Status::Ok);
        prop_assert_eq!(result.data, (new & lanes) | (old & !lanes));
    }

    /// Translation keeps the page offset and substitutes the page number.
    #[test]
    fn prop_translation_preserves_offset(
        vpn in 0u64..0x10_0000,
        ppn in 0u64..0x1_0000,
        offset in 0u64..PAGE,
    ) {
        let mut model = MemoryModel::create(None).unwrap();
        model.load_tlb(vpn * PAGE, ppn * PAGE);

        let translation = model.translate(vpn * PAGE + offset);
        prop_assert_eq!(translation.status, Status::Ok);
        prop_assert_eq!(translation.paddr.val(), ppn * PAGE + offset);
    }

    /// Loading one more mapping than the TLB holds evicts only the oldest.
    #[test]
    fn prop_round_robin_eviction(capacity in 1u32..16) {
        let cfg = ModelConfig {
            tlb_entries: capacity,
            ..ModelConfig::default()
        };
        let mut model = MemoryModel::new(cfg).unwrap();

        for page in 0..=u64::from(capacity) {
            model.load_tlb(page * PAGE, page * PAGE);
        }

        prop_assert_eq!(model.active_entries(), capacity);
        prop_assert_eq!(model.tlb_write_index(), 1 % capacity);
        prop_assert_eq!(model.translate(0).status, Status::ErrAddr);
        for page in 1..=u64::from(capacity) {
            prop_assert_eq!(model.translate(page * PAGE).status, Status::Ok);
        }
    }

    /// Every access misses until a mapping for its page is loaded.
    #[test]
    fn prop_miss_before_mapping(addr in any::<u64>(), mask in 0u32..=0xFF, data in any::<u64>()) {
        let mut model = MemoryModel::create(None).unwrap();

        let result = model.read(addr, mask);
        prop_assert_eq!(result.status, Status::ErrAddr);
        prop_assert_eq!(result.data, 0);
        prop_assert_eq!(model.write(addr, mask, data), Status::ErrAddr);
        prop_assert_eq!(model.active_entries(), 0);
    }

    /// Read data never carries bits above the data width.
    #[test]
    fn prop_data_width_masking(bytes in 1u32..=8, data in any::<u64>()) {
        let cfg = ModelConfig {
            data_width: bytes * 8,
            ..ModelConfig::default()
        };
        let mut model = MemoryModel::new(cfg).unwrap();
        model.load_tlb(0x0, 0x0);

        let full = model.full_byte_mask();
        prop_assert_eq!(model.write(0x0, full, data), Status::Ok);
        prop_assert_eq!(model.read(0x0, 0).data, data & mask_from_width(bytes * 8));
        prop_assert_eq!(model.read(0x0, full + 1).status, Status::ErrAccess);
    }
}
