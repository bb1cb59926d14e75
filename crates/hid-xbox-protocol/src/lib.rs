//! Xbox Wireless Controller HID protocol over Bluetooth Classic and BLE.
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.

#![deny(static_mut_refs)]

pub mod ids;
pub mod input;
pub mod output;
pub mod types;

pub use ids::{MICROSOFT_VENDOR_ID, product_ids, report_ids};
pub use input::{XboxReport, XboxInputState, parse_input_report};
pub use output::{RUMBLE_REPORT_LEN, build_rumble_report};
pub use types::XboxModel;
