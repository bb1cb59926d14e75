//! Fuzzes the DualShock 4 and DualSense input report parsers.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_sony_input
#![no_main]
use libfuzzer_sys::fuzz_target;
use padbridge_hid_sony_protocol::{parse_ds4_report, parse_dualsense_report};

fuzz_target!(|data: &[u8]| {
    if let Ok(state) = parse_ds4_report(data) {
        let _ = state.to_gamepad();
    }
    if let Ok(state) = parse_dualsense_report(data) {
        let _ = state.to_gamepad();
    }
});
