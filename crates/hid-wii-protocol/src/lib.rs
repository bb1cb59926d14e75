//! Wii Remote HID protocol: data-report layouts, Nunchuk and Balance Board
//! extensions, register access for extension detection, LED and rumble
//! reports.
//!
//! This crate is intentionally I/O-free and allocation-free.
//! It provides pure functions and types that can be tested without hardware.

#![deny(static_mut_refs)]

pub mod ids;
pub mod input;
pub mod output;
pub mod setup;
pub mod types;

pub use ids::{NINTENDO_VENDOR_ID, names, product_ids, report_ids};
pub use input::{
    NunchukState, WiiData, WiiReport, WiiStatus, battery_from_raw, parse_balance_board,
    parse_input_report, remote_to_gamepad, remote_with_nunchuk_to_gamepad,
};
pub use output::{
    MAX_OUTPUT_LEN, WiiOutput, build_leds_report, build_read_register, build_reporting_mode,
    build_rumble_report, build_status_request, build_write_register,
};
pub use setup::{SetupAction, WiiSetup, WiiSetupStep};
pub use types::WiiExtension;
