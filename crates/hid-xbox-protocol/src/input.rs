//! Xbox Wireless Controller input report parsing.
//!
//! All functions are pure and allocation-free.
//!
//! Report `0x01` (16 bytes, 17 with the share button):
//!
//! ```text
//! [0x01, lx(2), ly(2), rx(2), ry(2), lt(2), rt(2), hat, buttons(2), share]
//! ```
//!
//! Sticks are unsigned 16-bit little endian centered on `0x8000`; triggers
//! are 10-bit. The hat is 1 = north, clockwise, 0 = released.

#![deny(static_mut_refs)]

use padbridge_errors::DecodeError;
use padbridge_hid_common::ReportReader;
use padbridge_model::gamepad::{self, Gamepad, dpad_from_hat};
use padbridge_model::{BATTERY_EMPTY, BATTERY_FULL};

use crate::ids::report_ids;

const FAMILY: &str = "xbox";

pub const GAMEPAD_REPORT_LEN: usize = 16;

/// Button bit positions in the `0x01` report.
pub mod buttons {
    pub const A: u16 = 1 << 0;
    pub const B: u16 = 1 << 1;
    pub const X: u16 = 1 << 3;
    pub const Y: u16 = 1 << 4;
    pub const LB: u16 = 1 << 6;
    pub const RB: u16 = 1 << 7;
    pub const VIEW: u16 = 1 << 10;
    pub const MENU: u16 = 1 << 11;
    pub const XBOX: u16 = 1 << 12;
    pub const LS: u16 = 1 << 13;
    pub const RS: u16 = 1 << 14;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XboxInputState {
    pub lx: u16,
    pub ly: u16,
    pub rx: u16,
    pub ry: u16,
    pub lt: u16,
    pub rt: u16,
    pub hat: u8,
    pub buttons: u16,
    pub share: bool,
}

/// One decoded Xbox input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XboxReport {
    Gamepad(XboxInputState),
    /// Guide button state from the separate `0x02` report.
    Guide(bool),
    /// Battery level `0..=3` from the `0x04` report.
    Battery(u8),
}

impl XboxInputState {
    pub fn to_gamepad(&self) -> Gamepad {
        let mut gp = Gamepad {
            axis_x: axis_from_u16(self.lx),
            axis_y: axis_from_u16(self.ly),
            axis_rx: axis_from_u16(self.rx),
            axis_ry: axis_from_u16(self.ry),
            brake: i32::from(self.lt & 0x03FF),
            throttle: i32::from(self.rt & 0x03FF),
            dpad: match self.hat {
                0 => 0,
                h => dpad_from_hat(h - 1),
            },
            ..Gamepad::default()
        };

        const MAP: [(u16, u16); 8] = [
            (buttons::A, gamepad::BUTTON_A),
            (buttons::B, gamepad::BUTTON_B),
            (buttons::X, gamepad::BUTTON_X),
            (buttons::Y, gamepad::BUTTON_Y),
            (buttons::LB, gamepad::BUTTON_SHOULDER_L),
            (buttons::RB, gamepad::BUTTON_SHOULDER_R),
            (buttons::LS, gamepad::BUTTON_THUMB_L),
            (buttons::RS, gamepad::BUTTON_THUMB_R),
        ];
        for (bit, button) in MAP {
            if self.buttons & bit != 0 {
                gp.buttons |= button;
            }
        }
        // Digital trigger bits, so digital consumers see a full pull.
        if gp.brake >= 1000 {
            gp.buttons |= gamepad::BUTTON_TRIGGER_L;
        }
        if gp.throttle >= 1000 {
            gp.buttons |= gamepad::BUTTON_TRIGGER_R;
        }

        if self.buttons & buttons::VIEW != 0 {
            gp.misc_buttons |= gamepad::MISC_SELECT;
        }
        if self.buttons & buttons::MENU != 0 {
            gp.misc_buttons |= gamepad::MISC_START;
        }
        if self.buttons & buttons::XBOX != 0 {
            gp.misc_buttons |= gamepad::MISC_SYSTEM;
        }
        if self.share {
            gp.misc_buttons |= gamepad::MISC_CAPTURE;
        }
        gp
    }
}

/// Stick value centered on `0x8000` to the canonical range.
pub fn axis_from_u16(raw: u16) -> i32 {
    (i32::from(raw) - 0x8000) >> 6
}

/// Battery level `0..=3` to the canonical scale.
pub fn battery_from_level(level: u8) -> u8 {
    match level & 0x03 {
        0 => BATTERY_EMPTY,
        3 => BATTERY_FULL,
        l => l * 85,
    }
}

pub fn parse_input_report(data: &[u8]) -> Result<XboxReport, DecodeError> {
    let r = ReportReader::new(FAMILY, data);
    match r.report_id()? {
        report_ids::GAMEPAD_INPUT => {
            let r = r.require(GAMEPAD_REPORT_LEN)?;
            Ok(XboxReport::Gamepad(XboxInputState {
                lx: r.u16_le_at(1)?,
                ly: r.u16_le_at(3)?,
                rx: r.u16_le_at(5)?,
                ry: r.u16_le_at(7)?,
                lt: r.u16_le_at(9)?,
                rt: r.u16_le_at(11)?,
                hat: r.u8_at(13)?,
                buttons: r.u16_le_at(14)?,
                share: r.u8_at(16).is_ok_and(|b| b & 0x01 != 0),
            }))
        }
        report_ids::GUIDE_INPUT => Ok(XboxReport::Guide(r.u8_at(1)? & 0x01 != 0)),
        report_ids::BATTERY_INPUT => Ok(XboxReport::Battery(r.u8_at(1)? & 0x03)),
        other => Err(DecodeError::unknown_report(FAMILY, other)),
    }
}
