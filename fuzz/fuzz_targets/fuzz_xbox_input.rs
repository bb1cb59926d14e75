//! Fuzzes the Xbox Bluetooth input report parser.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_xbox_input
#![no_main]
use libfuzzer_sys::fuzz_target;
use padbridge_hid_xbox_protocol::{XboxReport, parse_input_report};

fuzz_target!(|data: &[u8]| {
    if let Ok(XboxReport::Gamepad(state)) = parse_input_report(data) {
        let _ = state.to_gamepad();
    }
});
