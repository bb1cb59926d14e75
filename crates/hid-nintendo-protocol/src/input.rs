//! Switch input report parsing.
//!
//! Full-mode report `0x30` and subcommand reply `0x21` share a 12-byte
//! prefix:
//!
//! ```text
//! [id, timer, battery<<4 | conn, right, shared, left, lstick(3), rstick(3)]
//! ```
//!
//! `0x30` then carries a vibrator byte and three IMU samples starting at 13.
//! `0x21` carries `ack` at 13, the echoed subcommand at 14 and reply data
//! from 15.

#![deny(static_mut_refs)]

use padbridge_errors::DecodeError;
use padbridge_hid_common::ReportReader;
use padbridge_model::gamepad::{self, Gamepad, PEDAL_MAX, clamp_axis};
use padbridge_model::{BATTERY_EMPTY, BATTERY_FULL};

use crate::calibration::{StickCalibration, unpack_pair};
use crate::ids::report_ids;
use crate::types::SwitchModel;

const FAMILY: &str = "switch";

pub const STANDARD_PREFIX_LEN: usize = 12;
pub const SUBCOMMAND_REPLY_MIN_LEN: usize = 15;
const IMU_OFFSET: usize = 13;
const IMU_END: usize = IMU_OFFSET + 12;

/// Right-side button byte.
pub mod right {
    pub const Y: u8 = 0x01;
    pub const X: u8 = 0x02;
    pub const B: u8 = 0x04;
    pub const A: u8 = 0x08;
    pub const SR: u8 = 0x10;
    pub const SL: u8 = 0x20;
    pub const R: u8 = 0x40;
    pub const ZR: u8 = 0x80;
}

/// Shared button byte.
pub mod shared {
    pub const MINUS: u8 = 0x01;
    pub const PLUS: u8 = 0x02;
    pub const RSTICK: u8 = 0x04;
    pub const LSTICK: u8 = 0x08;
    pub const HOME: u8 = 0x10;
    pub const CAPTURE: u8 = 0x20;
}

/// Left-side button byte.
pub mod left {
    pub const DOWN: u8 = 0x01;
    pub const UP: u8 = 0x02;
    pub const RIGHT: u8 = 0x04;
    pub const LEFT: u8 = 0x08;
    pub const SR: u8 = 0x10;
    pub const SL: u8 = 0x20;
    pub const L: u8 = 0x40;
    pub const ZL: u8 = 0x80;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchInputState {
    /// High nibble of byte 2: level `0..=8`, bit 0 set while charging.
    pub battery_level: u8,
    pub right: u8,
    pub shared: u8,
    pub left: u8,
    /// Raw 12-bit (x, y), y grows up.
    pub left_stick: (u16, u16),
    pub right_stick: (u16, u16),
    /// First IMU sample, when the report carries one.
    pub accel: Option<[i16; 3]>,
    pub gyro: Option<[i16; 3]>,
}

/// One decoded Switch input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchReport<'a> {
    Input(SwitchInputState),
    SubcommandReply {
        state: SwitchInputState,
        ack: u8,
        subcommand: u8,
        data: &'a [u8],
    },
}

impl SwitchInputState {
    pub fn battery(&self) -> u8 {
        match self.battery_level >> 1 {
            0 => BATTERY_EMPTY,
            l => u8::try_from(u16::from(l.min(4)) * u16::from(BATTERY_FULL) / 4)
                .unwrap_or(BATTERY_FULL),
        }
    }

    pub fn is_charging(&self) -> bool {
        self.battery_level & 0x01 != 0
    }

    /// Map to the canonical gamepad for the given model.
    ///
    /// Single Joy-Cons are treated as sideways pads: face buttons are
    /// chosen by position and the stick is rotated a quarter turn.
    pub fn to_gamepad(
        &self,
        model: SwitchModel,
        left_cal: &StickCalibration,
        right_cal: &StickCalibration,
    ) -> Gamepad {
        let mut gp = match model {
            SwitchModel::JoyConLeft => self.joycon_left(left_cal),
            SwitchModel::JoyConRight => self.joycon_right(right_cal),
            SwitchModel::ProController | SwitchModel::Unknown => self.pro(left_cal, right_cal),
        };
        if gp.pressed(gamepad::BUTTON_TRIGGER_L) {
            gp.brake = PEDAL_MAX;
        }
        if gp.pressed(gamepad::BUTTON_TRIGGER_R) {
            gp.throttle = PEDAL_MAX;
        }
        if let Some(accel) = self.accel {
            gp.accel = accel.map(i32::from);
        }
        if let Some(gyro) = self.gyro {
            gp.gyro = gyro.map(i32::from);
        }
        gp
    }

    fn pro(&self, left_cal: &StickCalibration, right_cal: &StickCalibration) -> Gamepad {
        let (lx, ly) = left_cal.normalize(self.left_stick.0, self.left_stick.1);
        let (rx, ry) = right_cal.normalize(self.right_stick.0, self.right_stick.1);
        let mut gp = Gamepad {
            axis_x: lx,
            axis_y: clamp_axis(-ly),
            axis_rx: rx,
            axis_ry: clamp_axis(-ry),
            ..Gamepad::default()
        };

        map_bits(&mut gp.buttons, self.right, &[
            (right::B, gamepad::BUTTON_A),
            (right::A, gamepad::BUTTON_B),
            (right::Y, gamepad::BUTTON_X),
            (right::X, gamepad::BUTTON_Y),
            (right::R, gamepad::BUTTON_SHOULDER_R),
            (right::ZR, gamepad::BUTTON_TRIGGER_R),
        ]);
        map_bits(&mut gp.buttons, self.left, &[
            (left::L, gamepad::BUTTON_SHOULDER_L),
            (left::ZL, gamepad::BUTTON_TRIGGER_L),
        ]);
        map_bits(&mut gp.buttons, self.shared, &[
            (shared::LSTICK, gamepad::BUTTON_THUMB_L),
            (shared::RSTICK, gamepad::BUTTON_THUMB_R),
        ]);
        map_bits(&mut gp.misc_buttons, self.shared, &[
            (shared::MINUS, gamepad::MISC_SELECT),
            (shared::PLUS, gamepad::MISC_START),
            (shared::HOME, gamepad::MISC_SYSTEM),
            (shared::CAPTURE, gamepad::MISC_CAPTURE),
        ]);

        for (bit, dir) in [
            (left::UP, gamepad::DPAD_UP),
            (left::DOWN, gamepad::DPAD_DOWN),
            (left::RIGHT, gamepad::DPAD_RIGHT),
            (left::LEFT, gamepad::DPAD_LEFT),
        ] {
            if self.left & bit != 0 {
                gp.dpad |= dir;
            }
        }
        gp
    }

    fn joycon_left(&self, cal: &StickCalibration) -> Gamepad {
        let (nx, ny) = cal.normalize(self.left_stick.0, self.left_stick.1);
        let mut gp = Gamepad {
            axis_x: clamp_axis(-ny),
            axis_y: clamp_axis(-nx),
            ..Gamepad::default()
        };
        map_bits(&mut gp.buttons, self.left, &[
            (left::LEFT, gamepad::BUTTON_A),
            (left::DOWN, gamepad::BUTTON_B),
            (left::UP, gamepad::BUTTON_X),
            (left::RIGHT, gamepad::BUTTON_Y),
            (left::SL, gamepad::BUTTON_SHOULDER_L),
            (left::SR, gamepad::BUTTON_SHOULDER_R),
            (left::L, gamepad::BUTTON_TRIGGER_L),
            (left::ZL, gamepad::BUTTON_TRIGGER_R),
        ]);
        map_bits(&mut gp.buttons, self.shared, &[(shared::LSTICK, gamepad::BUTTON_THUMB_L)]);
        map_bits(&mut gp.misc_buttons, self.shared, &[
            (shared::MINUS, gamepad::MISC_START),
            (shared::CAPTURE, gamepad::MISC_CAPTURE),
        ]);
        gp
    }

    fn joycon_right(&self, cal: &StickCalibration) -> Gamepad {
        let (nx, ny) = cal.normalize(self.right_stick.0, self.right_stick.1);
        let mut gp = Gamepad {
            axis_x: ny,
            axis_y: nx,
            ..Gamepad::default()
        };
        map_bits(&mut gp.buttons, self.right, &[
            (right::A, gamepad::BUTTON_A),
            (right::B, gamepad::BUTTON_X),
            (right::Y, gamepad::BUTTON_Y),
            (right::X, gamepad::BUTTON_B),
            (right::SL, gamepad::BUTTON_SHOULDER_L),
            (right::SR, gamepad::BUTTON_SHOULDER_R),
            (right::R, gamepad::BUTTON_TRIGGER_L),
            (right::ZR, gamepad::BUTTON_TRIGGER_R),
        ]);
        map_bits(&mut gp.buttons, self.shared, &[(shared::RSTICK, gamepad::BUTTON_THUMB_L)]);
        map_bits(&mut gp.misc_buttons, self.shared, &[
            (shared::PLUS, gamepad::MISC_START),
            (shared::HOME, gamepad::MISC_SYSTEM),
        ]);
        gp
    }
}

fn map_bits(out: &mut u16, raw: u8, map: &[(u8, u16)]) {
    for &(bit, button) in map {
        if raw & bit != 0 {
            *out |= button;
        }
    }
}

fn parse_state(r: &ReportReader<'_>) -> Result<SwitchInputState, DecodeError> {
    let imu = |offset: usize| -> Option<[i16; 3]> {
        Some([
            r.i16_le_at(offset).ok()?,
            r.i16_le_at(offset + 2).ok()?,
            r.i16_le_at(offset + 4).ok()?,
        ])
    };
    let has_imu = r.u8_at(0)? == report_ids::FULL_INPUT && r.len() >= IMU_END;
    Ok(SwitchInputState {
        battery_level: r.u8_at(2)? >> 4,
        right: r.u8_at(3)?,
        shared: r.u8_at(4)?,
        left: r.u8_at(5)?,
        left_stick: unpack_pair(r.bytes_at::<3>(6)?),
        right_stick: unpack_pair(r.bytes_at::<3>(9)?),
        accel: if has_imu { imu(IMU_OFFSET) } else { None },
        gyro: if has_imu { imu(IMU_OFFSET + 6) } else { None },
    })
}

/// Parse a report received on the interrupt channel.
///
/// Simple-mode `0x3F` reports are rejected as unknown; they only arrive
/// before setup has selected full mode.
pub fn parse_input_report(data: &[u8]) -> Result<SwitchReport<'_>, DecodeError> {
    let r = ReportReader::new(FAMILY, data);
    match r.report_id()? {
        report_ids::FULL_INPUT => {
            let r = r.require(STANDARD_PREFIX_LEN)?;
            Ok(SwitchReport::Input(parse_state(&r)?))
        }
        report_ids::SUBCOMMAND_REPLY => {
            let r = r.require(SUBCOMMAND_REPLY_MIN_LEN)?;
            Ok(SwitchReport::SubcommandReply {
                state: parse_state(&r)?,
                ack: r.u8_at(13)?,
                subcommand: r.u8_at(14)?,
                data: r.tail(15),
            })
        }
        other => Err(DecodeError::unknown_report(FAMILY, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report(right_b: u8, shared_b: u8, left_b: u8, stick: [u8; 3]) -> Vec<u8> {
        let mut r = vec![0x30, 0x00, 0x8E, right_b, shared_b, left_b];
        r.extend_from_slice(&stick);
        r.extend_from_slice(&[0x00, 0x08, 0x80]);
        r.push(0x00);
        r
    }

    const CENTER: [u8; 3] = [0x00, 0x08, 0x80];

    #[test]
    fn test_pro_buttons_positional() -> Result<(), Box<dyn std::error::Error>> {
        let data = full_report(right::B | right::ZR, shared::HOME, left::UP | left::L, CENTER);
        let SwitchReport::Input(state) = parse_input_report(&data)? else {
            return Err("expected input report".into());
        };
        let cal = StickCalibration::default();
        let gp = state.to_gamepad(SwitchModel::ProController, &cal, &cal);
        assert_eq!(
            gp.buttons,
            gamepad::BUTTON_A | gamepad::BUTTON_TRIGGER_R | gamepad::BUTTON_SHOULDER_L
        );
        assert_eq!(gp.throttle, PEDAL_MAX);
        assert_eq!(gp.brake, 0);
        assert_eq!(gp.dpad, gamepad::DPAD_UP);
        assert_eq!(gp.misc_buttons, gamepad::MISC_SYSTEM);
        assert_eq!((gp.axis_x, gp.axis_y), (0, 0));
        Ok(())
    }

    #[test]
    fn test_pro_stick_up_is_negative_y() -> Result<(), Box<dyn std::error::Error>> {
        // x = 2048, y = 2048 + 1536
        let y: u16 = 2048 + 1536;
        let stick = [0x00, 0x08 | ((y & 0x0F) as u8) << 4, (y >> 4) as u8];
        let SwitchReport::Input(state) = parse_input_report(&full_report(0, 0, 0, stick))? else {
            return Err("expected input report".into());
        };
        let cal = StickCalibration::default();
        let gp = state.to_gamepad(SwitchModel::ProController, &cal, &cal);
        assert_eq!(gp.axis_y, -gamepad::AXIS_MAX);
        Ok(())
    }

    #[test]
    fn test_joycon_left_sideways() -> Result<(), Box<dyn std::error::Error>> {
        let data = full_report(0, shared::MINUS, left::LEFT | left::SR, CENTER);
        let SwitchReport::Input(state) = parse_input_report(&data)? else {
            return Err("expected input report".into());
        };
        let cal = StickCalibration::default();
        let gp = state.to_gamepad(SwitchModel::JoyConLeft, &cal, &cal);
        assert_eq!(gp.buttons, gamepad::BUTTON_A | gamepad::BUTTON_SHOULDER_R);
        assert_eq!(gp.misc_buttons, gamepad::MISC_START);
        Ok(())
    }

    #[test]
    fn test_joycon_right_sideways() -> Result<(), Box<dyn std::error::Error>> {
        let data = full_report(right::X | right::R, shared::HOME, 0, CENTER);
        let SwitchReport::Input(state) = parse_input_report(&data)? else {
            return Err("expected input report".into());
        };
        let cal = StickCalibration::default();
        let gp = state.to_gamepad(SwitchModel::JoyConRight, &cal, &cal);
        assert_eq!(gp.buttons, gamepad::BUTTON_B | gamepad::BUTTON_TRIGGER_L);
        assert_eq!(gp.brake, PEDAL_MAX);
        assert_eq!(gp.misc_buttons, gamepad::MISC_SYSTEM);
        Ok(())
    }

    #[test]
    fn test_battery_and_imu() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = full_report(0, 0, 0, CENTER);
        for v in [10i16, -20, 30, 1, 2, 3] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let SwitchReport::Input(state) = parse_input_report(&data)? else {
            return Err("expected input report".into());
        };
        // 0x8E: level 8, not charging
        assert_eq!(state.battery(), BATTERY_FULL);
        assert!(!state.is_charging());
        assert_eq!(state.accel, Some([10, -20, 30]));
        assert_eq!(state.gyro, Some([1, 2, 3]));
        let cal = StickCalibration::default();
        let gp = state.to_gamepad(SwitchModel::ProController, &cal, &cal);
        assert_eq!(gp.accel, [10, -20, 30]);
        Ok(())
    }

    #[test]
    fn test_battery_levels() {
        let state = |level| SwitchInputState {
            battery_level: level,
            ..SwitchInputState::default()
        };
        assert_eq!(state(0).battery(), BATTERY_EMPTY);
        assert_eq!(state(1).battery(), BATTERY_EMPTY);
        assert_eq!(state(4).battery(), 127);
        assert!(state(5).is_charging());
    }

    #[test]
    fn test_subcommand_reply() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = full_report(0, 0, 0, CENTER);
        report[0] = 0x21;
        report.extend_from_slice(&[0x90, 0x10, 0x3D, 0x60, 0x00, 0x00, 0x02, 0xAB, 0xCD]);
        let SwitchReport::SubcommandReply { ack, subcommand, data, .. } = parse_input_report(&report)?
        else {
            return Err("expected subcommand reply".into());
        };
        assert_eq!(ack, 0x90);
        assert_eq!(subcommand, 0x10);
        assert_eq!(data, &[0x3D, 0x60, 0x00, 0x00, 0x02, 0xAB, 0xCD]);
        Ok(())
    }

    #[test]
    fn test_simple_mode_and_truncation() {
        assert!(matches!(
            parse_input_report(&[0x3F, 0x00, 0x08, 0x00]),
            Err(DecodeError::UnknownReport { report_id: 0x3F, .. })
        ));
        assert!(matches!(
            parse_input_report(&[0x30, 0x00, 0x8E]),
            Err(DecodeError::Truncated { expected: 12, actual: 3, .. })
        ));
    }
}
