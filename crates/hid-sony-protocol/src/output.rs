//! DualShock 4 / DualSense Bluetooth output report encoding.
//!
//! All functions are pure and allocation-free.
//!
//! Both pads take a 78-byte output report over Bluetooth, terminated by a
//! CRC-32 (little endian) computed over the HIDP output header byte `0xA2`
//! followed by the first 74 report bytes.
//!
//! DualShock 4 (`0x11`):
//!
//! ```text
//! [0x11, 0xC0, 0x00, valid0, valid1, 0x00, motor_right, motor_left,
//!  red, green, blue, blink_on, blink_off, 0.., crc32]
//! ```
//!
//! DualSense (`0x31`):
//!
//! ```text
//! [0x31, seq << 4, 0x10, common[47], 0[24], crc32]
//! common: valid0 valid1 motor_right motor_left 0[4] mute power_save
//!         right_trigger[11] left_trigger[11] 0[6] valid2 0[2]
//!         lightbar_setup brightness player_leds red green blue
//! ```
//!
//! The right motor is the weak (high frequency) one.

#![deny(static_mut_refs)]

use padbridge_hid_common::crc::{HIDP_OUTPUT_SEED, bt_crc32};
use padbridge_hid_common::write_at;
use padbridge_model::{Rgb, TriggerEffect};

use crate::ids::report_ids;
use crate::triggers::encode_trigger_effect;

/// Wire size of both Bluetooth output reports.
pub const OUTPUT_REPORT_LEN: usize = 78;
const CRC_OFFSET: usize = OUTPUT_REPORT_LEN - 4;

pub mod ds4_flags {
    pub const HWCTL_HID: u8 = 0x80;
    pub const HWCTL_CRC32: u8 = 0x40;
    pub const VALID0_MOTOR: u8 = 0x01;
    pub const VALID0_LED: u8 = 0x02;
    pub const VALID0_LED_BLINK: u8 = 0x04;
}

pub mod dualsense_flags {
    pub const OUTPUT_TAG: u8 = 0x10;
    pub const VALID0_COMPATIBLE_VIBRATION: u8 = 0x01;
    pub const VALID0_HAPTICS_SELECT: u8 = 0x02;
    pub const VALID0_RIGHT_TRIGGER: u8 = 0x04;
    pub const VALID0_LEFT_TRIGGER: u8 = 0x08;
    pub const VALID1_MIC_MUTE_LED: u8 = 0x01;
    pub const VALID1_LIGHTBAR: u8 = 0x04;
    pub const VALID1_PLAYER_INDICATOR: u8 = 0x10;
    pub const VALID2_LIGHTBAR_SETUP: u8 = 0x02;
    pub const LIGHTBAR_SETUP_LIGHT_OUT: u8 = 0x02;
}

/// Fields to change in one DualShock 4 output report. `None` leaves the
/// pad's current setting alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ds4Output {
    /// `(weak, strong)` motor magnitudes.
    pub rumble: Option<(u8, u8)>,
    pub lightbar: Option<Rgb>,
}

/// Fields to change in one DualSense output report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualSenseOutput {
    /// `(weak, strong)` motor magnitudes.
    pub rumble: Option<(u8, u8)>,
    pub lightbar: Option<Rgb>,
    /// Five-LED pattern, see [`dualsense_player_pattern`].
    pub player_leds: Option<u8>,
    pub right_trigger: Option<TriggerEffect>,
    pub left_trigger: Option<TriggerEffect>,
}

/// Build a DualShock 4 Bluetooth output report (`0x11`).
pub fn build_ds4_output_report(req: &Ds4Output) -> [u8; OUTPUT_REPORT_LEN] {
    let mut out = [0u8; OUTPUT_REPORT_LEN];
    out[0] = report_ids::DS4_BT_OUTPUT;
    out[1] = ds4_flags::HWCTL_HID | ds4_flags::HWCTL_CRC32;

    if let Some((weak, strong)) = req.rumble {
        out[3] |= ds4_flags::VALID0_MOTOR;
        out[6] = weak;
        out[7] = strong;
    }
    if let Some(rgb) = req.lightbar {
        out[3] |= ds4_flags::VALID0_LED | ds4_flags::VALID0_LED_BLINK;
        out[8] = rgb.r;
        out[9] = rgb.g;
        out[10] = rgb.b;
        // blink on/off zero: solid
    }

    seal(&mut out);
    out
}

/// Build a DualSense Bluetooth output report (`0x31`).
///
/// `seq` is a 4-bit rolling counter owned by the caller.
pub fn build_dualsense_output_report(seq: u8, req: &DualSenseOutput) -> [u8; OUTPUT_REPORT_LEN] {
    use dualsense_flags as f;

    const COMMON: usize = 3;
    const RIGHT_TRIGGER: usize = COMMON + 10;
    const LEFT_TRIGGER: usize = COMMON + 21;

    let mut out = [0u8; OUTPUT_REPORT_LEN];
    out[0] = report_ids::DUALSENSE_BT_OUTPUT;
    out[1] = (seq & 0x0F) << 4;
    out[2] = f::OUTPUT_TAG;

    if let Some((weak, strong)) = req.rumble {
        out[COMMON] |= f::VALID0_COMPATIBLE_VIBRATION | f::VALID0_HAPTICS_SELECT;
        out[COMMON + 2] = weak;
        out[COMMON + 3] = strong;
    }
    if let Some(effect) = req.right_trigger {
        out[COMMON] |= f::VALID0_RIGHT_TRIGGER;
        write_at(&mut out, RIGHT_TRIGGER, &encode_trigger_effect(&effect));
    }
    if let Some(effect) = req.left_trigger {
        out[COMMON] |= f::VALID0_LEFT_TRIGGER;
        write_at(&mut out, LEFT_TRIGGER, &encode_trigger_effect(&effect));
    }
    if let Some(rgb) = req.lightbar {
        out[COMMON + 1] |= f::VALID1_LIGHTBAR;
        out[COMMON + 38] |= f::VALID2_LIGHTBAR_SETUP;
        out[COMMON + 41] = f::LIGHTBAR_SETUP_LIGHT_OUT;
        out[COMMON + 44] = rgb.r;
        out[COMMON + 45] = rgb.g;
        out[COMMON + 46] = rgb.b;
    }
    if let Some(pattern) = req.player_leds {
        out[COMMON + 1] |= f::VALID1_PLAYER_INDICATOR;
        out[COMMON + 43] = pattern & 0x1F;
    }

    seal(&mut out);
    out
}

/// Map a seat bitmask (bit 0 = first seat) onto the DualSense's five player
/// LEDs. Bit 4 lights all five.
pub fn dualsense_player_pattern(mask: u8) -> u8 {
    const PATTERNS: [u8; 5] = [0x04, 0x0A, 0x15, 0x1B, 0x1F];
    PATTERNS
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .fold(0, |acc, (_, pattern)| acc | pattern)
}

fn seal(out: &mut [u8; OUTPUT_REPORT_LEN]) {
    let crc = bt_crc32(HIDP_OUTPUT_SEED, &out[..CRC_OFFSET]);
    out[CRC_OFFSET..].copy_from_slice(&crc.to_le_bytes());
}
