//! DualShock 4 / DualSense input report parsing.
//!
//! All functions are pure and allocation-free.
//!
//! # Report layouts (Bluetooth)
//!
//! Both pads start in a reduced mode that sends report `0x01`:
//!
//! ```text
//! [0x01, lx, ly, rx, ry, buttons0, buttons1, buttons2, l2, r2]
//! ```
//!
//! After the calibration feature report is read they switch to full reports.
//! DualShock 4 sends `0x11` with the common block at offset 3:
//!
//! ```text
//! +0 lx ly rx ry | +4 buttons[3] | +7 l2 r2 | +9 timestamp(2) temp
//! +12 gyro[3] (i16 le) | +18 accel[3] (i16 le) | +29 status[2]
//! ```
//!
//! DualSense sends `0x31` with its common block at offset 2:
//!
//! ```text
//! +0 lx ly rx ry l2 r2 | +6 seq | +7 buttons[4] | +15 gyro[3] | +21 accel[3]
//! +52 status
//! ```
//!
//! Button bytes are shared: `buttons0` low nibble is the hat (0 = north,
//! clockwise, 8 = released) and the high nibble is square/cross/circle/
//! triangle; `buttons1` is L1 R1 L2 R2 share options L3 R3; `buttons2` is
//! PS, touchpad click and (DualSense) mute.

#![deny(static_mut_refs)]

use padbridge_errors::DecodeError;
use padbridge_hid_common::ReportReader;
use padbridge_model::gamepad::{
    self, Gamepad, axis_from_u8, dpad_from_hat, pedal_from_u8,
};
use padbridge_model::{BATTERY_EMPTY, BATTERY_FULL, BATTERY_NOT_AVAILABLE};

use crate::ids::report_ids;

const DS4_FAMILY: &str = "ds4";
const DUALSENSE_FAMILY: &str = "dualsense";

pub const SIMPLE_REPORT_LEN: usize = 10;
/// DS4 full report, through the status bytes.
pub const DS4_BT_MIN_LEN: usize = 34;
/// DualSense full report, through the status byte.
pub const DUALSENSE_BT_MIN_LEN: usize = 55;

const DS4_COMMON_OFFSET: usize = 3;
const DUALSENSE_COMMON_OFFSET: usize = 2;

/// Parsed state from one Sony input report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SonyInputState {
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
    pub l2: u8,
    pub r2: u8,
    pub buttons: [u8; 3],
    pub gyro: [i16; 3],
    pub accel: [i16; 3],
    /// Raw status byte: low nibble capacity 0..=10, bit 4 cable attached.
    pub status: Option<u8>,
    /// True for the full `0x11`/`0x31` report.
    pub full_report: bool,
}

impl SonyInputState {
    /// Map onto the canonical gamepad.
    pub fn to_gamepad(&self) -> Gamepad {
        let [b0, b1, b2] = self.buttons;
        let mut gp = Gamepad {
            dpad: dpad_from_hat(b0 & 0x0F),
            axis_x: axis_from_u8(self.lx),
            axis_y: axis_from_u8(self.ly),
            axis_rx: axis_from_u8(self.rx),
            axis_ry: axis_from_u8(self.ry),
            brake: pedal_from_u8(self.l2),
            throttle: pedal_from_u8(self.r2),
            gyro: self.gyro.map(i32::from),
            accel: self.accel.map(i32::from),
            ..Gamepad::default()
        };

        const FACE: [(u8, u16); 4] = [
            (0x10, gamepad::BUTTON_X), // square
            (0x20, gamepad::BUTTON_A), // cross
            (0x40, gamepad::BUTTON_B), // circle
            (0x80, gamepad::BUTTON_Y), // triangle
        ];
        const SHOULDERS: [(u8, u16); 6] = [
            (0x01, gamepad::BUTTON_SHOULDER_L),
            (0x02, gamepad::BUTTON_SHOULDER_R),
            (0x04, gamepad::BUTTON_TRIGGER_L),
            (0x08, gamepad::BUTTON_TRIGGER_R),
            (0x40, gamepad::BUTTON_THUMB_L),
            (0x80, gamepad::BUTTON_THUMB_R),
        ];
        for (bit, button) in FACE {
            if b0 & bit != 0 {
                gp.buttons |= button;
            }
        }
        for (bit, button) in SHOULDERS {
            if b1 & bit != 0 {
                gp.buttons |= button;
            }
        }

        if b1 & 0x10 != 0 {
            gp.misc_buttons |= gamepad::MISC_SELECT;
        }
        if b1 & 0x20 != 0 {
            gp.misc_buttons |= gamepad::MISC_START;
        }
        if b2 & 0x01 != 0 {
            gp.misc_buttons |= gamepad::MISC_SYSTEM;
        }
        // Touchpad click on both pads, mute on DualSense.
        if b2 & 0x06 != 0 {
            gp.misc_buttons |= gamepad::MISC_CAPTURE;
        }
        gp
    }

    /// Canonical battery level.
    pub fn battery(&self) -> u8 {
        let Some(status) = self.status else {
            return BATTERY_NOT_AVAILABLE;
        };
        let capacity = u16::from((status & 0x0F).min(10));
        if capacity == 0 {
            return BATTERY_EMPTY;
        }
        let level = capacity * u16::from(BATTERY_FULL) / 10;
        u8::try_from(level).unwrap_or(BATTERY_FULL).max(BATTERY_EMPTY)
    }
}

/// Parse a DualShock 4 Bluetooth input report (`0x01` or `0x11`).
pub fn parse_ds4_report(data: &[u8]) -> Result<SonyInputState, DecodeError> {
    let r = ReportReader::new(DS4_FAMILY, data);
    match r.report_id()? {
        report_ids::SIMPLE_INPUT => parse_simple(r),
        report_ids::DS4_BT_INPUT => {
            let r = r.require(DS4_BT_MIN_LEN)?;
            let c = DS4_COMMON_OFFSET;
            let [lx, ly, rx, ry] = r.bytes_at(c)?;
            Ok(SonyInputState {
                lx,
                ly,
                rx,
                ry,
                buttons: r.bytes_at(c + 4)?,
                l2: r.u8_at(c + 7)?,
                r2: r.u8_at(c + 8)?,
                gyro: read_triplet(&r, c + 12)?,
                accel: read_triplet(&r, c + 18)?,
                status: Some(r.u8_at(c + 29)?),
                full_report: true,
            })
        }
        other => Err(DecodeError::unknown_report(DS4_FAMILY, other)),
    }
}

/// Parse a DualSense Bluetooth input report (`0x01` or `0x31`).
pub fn parse_dualsense_report(data: &[u8]) -> Result<SonyInputState, DecodeError> {
    let r = ReportReader::new(DUALSENSE_FAMILY, data);
    match r.report_id()? {
        report_ids::SIMPLE_INPUT => parse_simple(r),
        report_ids::DUALSENSE_BT_INPUT => {
            let r = r.require(DUALSENSE_BT_MIN_LEN)?;
            let c = DUALSENSE_COMMON_OFFSET;
            let [lx, ly, rx, ry, l2, r2] = r.bytes_at(c)?;
            let [b0, b1, b2, _] = r.bytes_at::<4>(c + 7)?;
            Ok(SonyInputState {
                lx,
                ly,
                rx,
                ry,
                l2,
                r2,
                buttons: [b0, b1, b2],
                gyro: read_triplet(&r, c + 15)?,
                accel: read_triplet(&r, c + 21)?,
                status: Some(r.u8_at(c + 52)?),
                full_report: true,
            })
        }
        other => Err(DecodeError::unknown_report(DUALSENSE_FAMILY, other)),
    }
}

fn parse_simple(r: ReportReader<'_>) -> Result<SonyInputState, DecodeError> {
    let r = r.require(SIMPLE_REPORT_LEN)?;
    let [lx, ly, rx, ry] = r.bytes_at(1)?;
    Ok(SonyInputState {
        lx,
        ly,
        rx,
        ry,
        buttons: r.bytes_at(5)?,
        l2: r.u8_at(8)?,
        r2: r.u8_at(9)?,
        ..SonyInputState::default()
    })
}

fn read_triplet(r: &ReportReader<'_>, offset: usize) -> Result<[i16; 3], DecodeError> {
    Ok([
        r.i16_le_at(offset)?,
        r.i16_le_at(offset + 2)?,
        r.i16_le_at(offset + 4)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds4_full(lx: u8, buttons: [u8; 3], status: u8) -> [u8; 78] {
        let mut r = [0u8; 78];
        r[0] = 0x11;
        r[1] = 0xC0;
        r[3] = lx;
        r[4] = 0x80;
        r[5] = 0x80;
        r[6] = 0x80;
        r[7..10].copy_from_slice(&buttons);
        r[10] = 0xFF; // l2
        r[15..17].copy_from_slice(&(-5i16).to_le_bytes()); // gyro x
        r[21..23].copy_from_slice(&8192i16.to_le_bytes()); // accel x
        r[32] = status;
        r
    }

    #[test]
    fn test_ds4_full_report() -> Result<(), Box<dyn std::error::Error>> {
        // cross + hat east, L1 + options, PS
        let report = ds4_full(0x00, [0x22, 0x21, 0x01], 0x05);
        let state = parse_ds4_report(&report)?;
        assert!(state.full_report);
        let gp = state.to_gamepad();
        assert_eq!(gp.axis_x, -512);
        assert_eq!(gp.axis_y, 0);
        assert_eq!(gp.brake, 1020);
        assert_eq!(gp.dpad, gamepad::DPAD_RIGHT);
        assert_eq!(gp.buttons, gamepad::BUTTON_A | gamepad::BUTTON_SHOULDER_L);
        assert_eq!(gp.misc_buttons, gamepad::MISC_START | gamepad::MISC_SYSTEM);
        assert_eq!(gp.gyro[0], -5);
        assert_eq!(gp.accel[0], 8192);
        assert_eq!(state.battery(), 127);
        Ok(())
    }

    #[test]
    fn test_ds4_simple_report() -> Result<(), Box<dyn std::error::Error>> {
        let report = [0x01, 0x80, 0xFF, 0x80, 0x80, 0x18, 0x00, 0x02, 0x00, 0x40];
        let state = parse_ds4_report(&report)?;
        assert!(!state.full_report);
        let gp = state.to_gamepad();
        assert_eq!(gp.axis_y, 508);
        assert_eq!(gp.dpad, 0);
        assert_eq!(gp.buttons, gamepad::BUTTON_X);
        assert_eq!(gp.misc_buttons, gamepad::MISC_CAPTURE);
        assert_eq!(gp.throttle, 256);
        assert_eq!(state.battery(), BATTERY_NOT_AVAILABLE);
        Ok(())
    }

    #[test]
    fn test_ds4_rejects_short_and_foreign() {
        assert!(matches!(
            parse_ds4_report(&[0x11, 0xC0, 0x00]),
            Err(DecodeError::Truncated { expected: 34, actual: 3, .. })
        ));
        assert!(matches!(
            parse_ds4_report(&[0x31; 80]),
            Err(DecodeError::UnknownReport { report_id: 0x31, .. })
        ));
        assert!(parse_ds4_report(&[]).is_err());
    }

    #[test]
    fn test_dualsense_full_report() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = [0u8; 78];
        report[0] = 0x31;
        report[2..8].copy_from_slice(&[0x80, 0x00, 0x80, 0x80, 0x00, 0xFF]);
        report[9] = 0x88; // triangle, hat released
        report[10] = 0x90; // create, R3
        report[11] = 0x04; // mute
        report[17..19].copy_from_slice(&100i16.to_le_bytes());
        report[54] = 0x1A; // charging, capacity 10
        let state = parse_dualsense_report(&report)?;
        let gp = state.to_gamepad();
        assert_eq!(gp.axis_y, -512);
        assert_eq!(gp.throttle, 1020);
        assert_eq!(gp.dpad, 0);
        assert_eq!(gp.buttons, gamepad::BUTTON_Y | gamepad::BUTTON_THUMB_R);
        assert_eq!(gp.misc_buttons, gamepad::MISC_SELECT | gamepad::MISC_CAPTURE);
        assert_eq!(gp.gyro[0], 100);
        assert_eq!(state.battery(), BATTERY_FULL);
        Ok(())
    }

    #[test]
    fn test_dualsense_truncated() {
        let report = [0x31u8; 40];
        assert!(matches!(
            parse_dualsense_report(&report),
            Err(DecodeError::Truncated { expected: 55, .. })
        ));
    }

    #[test]
    fn test_battery_scale() {
        let mut state = SonyInputState {
            status: Some(0x00),
            ..SonyInputState::default()
        };
        assert_eq!(state.battery(), BATTERY_EMPTY);
        state.status = Some(0x0F);
        assert_eq!(state.battery(), BATTERY_FULL);
        state.status = Some(0x01);
        assert_eq!(state.battery(), 25);
    }
}
