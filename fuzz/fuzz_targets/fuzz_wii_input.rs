//! Fuzzes the Wii remote report parser and the extension decoders.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_wii_input
#![no_main]
use libfuzzer_sys::fuzz_target;
use padbridge_hid_wii_protocol::input::{NunchukState, parse_balance_board};
use padbridge_hid_wii_protocol::parse_input_report;

fuzz_target!(|data: &[u8]| {
    let _ = parse_input_report(data);
    let _ = NunchukState::parse(data);
    let _ = parse_balance_board(data);
});
