//! Sony HID protocol: DualShock 4 and DualSense input parsing, output report
//! encoding and adaptive trigger effects over Bluetooth.
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.
//! It provides pure functions and types that can be tested without hardware.

#![deny(static_mut_refs)]

pub mod ids;
pub mod input;
pub mod output;
pub mod triggers;
pub mod types;

pub use ids::{SONY_VENDOR_ID, product_ids, report_ids};
pub use input::{SonyInputState, parse_ds4_report, parse_dualsense_report};
pub use output::{
    Ds4Output, DualSenseOutput, OUTPUT_REPORT_LEN, build_ds4_output_report,
    build_dualsense_output_report, dualsense_player_pattern,
};
pub use triggers::{TRIGGER_EFFECT_LEN, encode_trigger_effect};
pub use types::SonyModel;
