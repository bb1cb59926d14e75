//! Property tests for report access and usage extraction.

use padbridge_hid_common::usage::{desktop, page};
use padbridge_hid_common::{
    HidField, HidGlobals, ReportLayout, ReportReader, extract_bits, sign_extend,
};
use proptest::prelude::*;

fn mouse_layout() -> ReportLayout {
    ReportLayout::new(vec![
        HidField::variable(2, page::BUTTON, 1, 0, HidGlobals::new(0, 1, 1, 5)),
        HidField::variable(2, page::GENERIC_DESKTOP, desktop::X, 8, HidGlobals::new(-2047, 2047, 12, 2)),
        HidField::variable(2, page::GENERIC_DESKTOP, desktop::WHEEL, 32, HidGlobals::new(-127, 127, 8, 1)),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_for_each_usage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        let layout = mouse_layout();
        let mut count = 0usize;
        let result = layout.for_each_usage(&bytes, |_, _, _, _| count += 1);
        match result {
            Ok(n) => prop_assert_eq!(n, count),
            Err(_) => prop_assert!(bytes.len() < 6 || bytes.first() != Some(&2)),
        }
    }

    #[test]
    fn prop_signed_values_stay_in_logical_range(bytes in proptest::collection::vec(any::<u8>(), 6..8)) {
        let mut bytes = bytes;
        if let Some(first) = bytes.first_mut() {
            *first = 2;
        }
        let layout = mouse_layout();
        layout.for_each_usage(&bytes, |g, p, u, v| {
            if p == page::GENERIC_DESKTOP && u != desktop::WHEEL {
                assert!((-2048..=2047).contains(&v), "12-bit axis out of range: {v}");
                assert_eq!(g.report_size, 12);
            }
        })?;
    }

    #[test]
    fn prop_extract_bits_matches_byte_reads(bytes in proptest::collection::vec(any::<u8>(), 1..8), idx in 0usize..8) {
        if let Some(byte) = bytes.get(idx) {
            prop_assert_eq!(extract_bits(&bytes, idx * 8, 8), Some(u32::from(*byte)));
            prop_assert_eq!(sign_extend(u32::from(*byte), 8), i32::from(*byte as i8));
        } else {
            prop_assert_eq!(extract_bits(&bytes, idx * 8, 8), None);
        }
    }

    #[test]
    fn prop_reader_never_reads_past_end(bytes in proptest::collection::vec(any::<u8>(), 0..32), offset in 0usize..64) {
        let r = ReportReader::new("prop", &bytes);
        let fits = offset + 2 <= bytes.len();
        prop_assert_eq!(r.u16_le_at(offset).is_ok(), fits);
        prop_assert_eq!(r.bytes_at::<4>(offset).is_ok(), offset + 4 <= bytes.len());
    }
}
