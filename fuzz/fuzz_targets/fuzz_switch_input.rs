//! Fuzzes the Switch input report, SPI reply and calibration parsers.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_switch_input
#![no_main]
use libfuzzer_sys::fuzz_target;
use padbridge_hid_nintendo_protocol::{
    parse_factory_stick_calibration, parse_input_report, parse_spi_read_reply,
};

fuzz_target!(|data: &[u8]| {
    let _ = parse_input_report(data);
    if let Some((_, payload)) = parse_spi_read_reply(data) {
        let _ = parse_factory_stick_calibration(payload);
    }
});
