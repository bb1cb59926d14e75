//! Nintendo Switch HID protocol: Pro Controller and Joy-Con input parsing,
//! subcommand encoding, factory stick calibration and HD rumble.
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.
//! It provides pure functions and types that can be tested without hardware.

#![deny(static_mut_refs)]

pub mod calibration;
pub mod ids;
pub mod input;
pub mod output;
pub mod setup;
pub mod types;

pub use calibration::{StickCalibration, parse_factory_stick_calibration};
pub use ids::{NINTENDO_VENDOR_ID, product_ids, report_ids, subcommands};
pub use input::{SwitchInputState, SwitchReport, parse_input_report};
pub use output::{
    RUMBLE_REPORT_LEN, SUBCOMMAND_REPORT_LEN, build_player_lights_report, build_rumble_report,
    build_subcommand_report, encode_rumble_amplitude,
};
pub use setup::{SetupStep, parse_spi_read_reply};
pub use types::SwitchModel;
