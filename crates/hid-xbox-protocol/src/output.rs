//! Xbox Wireless Controller rumble report encoding.
//!
//! Report `0x03` (9 bytes):
//!
//! ```text
//! [0x03, enable, lt_magnitude, rt_magnitude, strong, weak,
//!  duration_10ms, start_delay_10ms, loop_count]
//! ```
//!
//! Magnitudes are percentages (0..=100). The pad times the effect itself, so
//! no stop report is needed.

#![deny(static_mut_refs)]

use padbridge_model::RumbleRequest;

use crate::ids::report_ids;

pub const RUMBLE_REPORT_LEN: usize = 9;

pub mod actuators {
    pub const WEAK: u8 = 0x01;
    pub const STRONG: u8 = 0x02;
    pub const RIGHT_TRIGGER: u8 = 0x04;
    pub const LEFT_TRIGGER: u8 = 0x08;
}

/// Build a rumble report for the two main motors.
pub fn build_rumble_report(req: &RumbleRequest) -> [u8; RUMBLE_REPORT_LEN] {
    [
        report_ids::RUMBLE_OUTPUT,
        actuators::WEAK | actuators::STRONG,
        0,
        0,
        percent(req.strong_magnitude),
        percent(req.weak_magnitude),
        ten_ms_units(req.duration_ms),
        ten_ms_units(req.start_delay_ms),
        0,
    ]
}

fn percent(magnitude: u8) -> u8 {
    u8::try_from(u16::from(magnitude) * 100 / 255).unwrap_or(100)
}

fn ten_ms_units(ms: u16) -> u8 {
    u8::try_from(ms / 10).unwrap_or(u8::MAX)
}
