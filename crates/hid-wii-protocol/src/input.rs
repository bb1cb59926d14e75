//! Wii Remote input report parsing.
//!
//! Data reports `0x30..=0x37` and `0x3D` differ only in which blocks they
//! carry, so they are decoded through one offset table. Offsets include the
//! report id byte.

#![deny(static_mut_refs)]

use padbridge_errors::DecodeError;
use padbridge_hid_common::ReportReader;
use padbridge_model::BalanceBoard;
use padbridge_model::gamepad::{self, Gamepad, PEDAL_MAX, axis_from_u8, clamp_axis};
use padbridge_model::{BATTERY_EMPTY, BATTERY_FULL};

use crate::ids::report_ids;

const FAMILY: &str = "wii";

/// Accelerometer rest value on every axis.
pub const ACCEL_CENTER: i32 = 512;
/// Status battery byte of a fresh set of cells.
const BATTERY_RAW_FULL: u16 = 0xC8;

/// Core button bits, byte 1 in the high half, byte 2 in the low half.
pub mod buttons {
    pub const TWO: u16 = 0x0001;
    pub const ONE: u16 = 0x0002;
    pub const B: u16 = 0x0004;
    pub const A: u16 = 0x0008;
    pub const MINUS: u16 = 0x0010;
    pub const HOME: u16 = 0x0080;
    pub const LEFT: u16 = 0x0100;
    pub const RIGHT: u16 = 0x0200;
    pub const DOWN: u16 = 0x0400;
    pub const UP: u16 = 0x0800;
    pub const PLUS: u16 = 0x1000;
    pub const MASK: u16 = 0x1F9F;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DataLayout {
    report_id: u8,
    buttons: bool,
    accel: bool,
    ext_offset: usize,
    ext_len: usize,
}

const fn layout(report_id: u8, buttons: bool, accel: bool, ext_offset: usize, ext_len: usize) -> DataLayout {
    DataLayout {
        report_id,
        buttons,
        accel,
        ext_offset,
        ext_len,
    }
}

const DATA_LAYOUTS: [DataLayout; 9] = [
    layout(report_ids::MODE_BUTTONS, true, false, 0, 0),
    layout(report_ids::MODE_BUTTONS_ACCEL, true, true, 0, 0),
    layout(report_ids::MODE_BUTTONS_EXT8, true, false, 3, 8),
    layout(report_ids::MODE_BUTTONS_ACCEL_IR12, true, true, 0, 0),
    layout(report_ids::MODE_BUTTONS_EXT19, true, false, 3, 19),
    layout(report_ids::MODE_BUTTONS_ACCEL_EXT16, true, true, 6, 16),
    layout(report_ids::MODE_BUTTONS_IR10_EXT9, true, false, 13, 9),
    layout(report_ids::MODE_BUTTONS_ACCEL_IR10_EXT6, true, true, 16, 6),
    layout(report_ids::MODE_EXT21, false, false, 1, 21),
];

impl DataLayout {
    fn min_len(&self) -> usize {
        let mut len = 1;
        if self.buttons {
            len = 3;
        }
        if self.accel {
            len = 6;
        }
        if self.ext_len > 0 {
            len = len.max(self.ext_offset + self.ext_len);
        }
        len
    }
}

/// Decoded data report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiiData<'a> {
    pub buttons: u16,
    /// Raw 10-bit (x, y, z).
    pub accel: Option<[u16; 3]>,
    pub extension: Option<&'a [u8]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiiStatus {
    pub buttons: u16,
    pub extension_connected: bool,
    pub battery_low: bool,
    pub leds: u8,
    pub battery_raw: u8,
}

impl WiiStatus {
    pub fn battery(&self) -> u8 {
        battery_from_raw(self.battery_raw)
    }
}

/// One decoded Wii Remote input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiiReport<'a> {
    Status(WiiStatus),
    ReadReply {
        error: u8,
        /// Low 16 bits of the address read.
        address: u16,
        data: &'a [u8],
    },
    Ack {
        report: u8,
        error: u8,
    },
    Data(WiiData<'a>),
}

fn core_buttons(r: &ReportReader<'_>) -> Result<u16, DecodeError> {
    Ok(r.u16_be_at(1)? & buttons::MASK)
}

pub fn parse_input_report(data: &[u8]) -> Result<WiiReport<'_>, DecodeError> {
    let r = ReportReader::new(FAMILY, data);
    let id = r.report_id()?;
    match id {
        report_ids::STATUS => {
            let r = r.require(7)?;
            let flags = r.u8_at(3)?;
            Ok(WiiReport::Status(WiiStatus {
                buttons: core_buttons(&r)?,
                extension_connected: flags & 0x02 != 0,
                battery_low: flags & 0x01 != 0,
                leds: flags >> 4,
                battery_raw: r.u8_at(6)?,
            }))
        }
        report_ids::READ_MEMORY_DATA => {
            let r = r.require(6)?;
            let size_err = r.u8_at(3)?;
            let size = usize::from(size_err >> 4) + 1;
            let error = size_err & 0x0F;
            let data = if error == 0 { r.sub(6, size)?.as_slice() } else { &[] };
            Ok(WiiReport::ReadReply {
                error,
                address: r.u16_be_at(4)?,
                data,
            })
        }
        report_ids::ACK => {
            let r = r.require(5)?;
            Ok(WiiReport::Ack {
                report: r.u8_at(3)?,
                error: r.u8_at(4)?,
            })
        }
        _ => {
            let Some(layout) = DATA_LAYOUTS.iter().find(|l| l.report_id == id) else {
                return Err(DecodeError::unknown_report(FAMILY, id));
            };
            let r = r.require(layout.min_len())?;
            let buttons = if layout.buttons { core_buttons(&r)? } else { 0 };
            let accel = if layout.accel {
                let b1 = r.u8_at(1)?;
                let b2 = r.u8_at(2)?;
                Some([
                    (u16::from(r.u8_at(3)?) << 2) | u16::from((b1 >> 5) & 0x03),
                    (u16::from(r.u8_at(4)?) << 2) | (u16::from((b2 >> 5) & 0x01) << 1),
                    (u16::from(r.u8_at(5)?) << 2) | (u16::from((b2 >> 6) & 0x01) << 1),
                ])
            } else {
                None
            };
            let extension = if layout.ext_len > 0 {
                Some(r.sub(layout.ext_offset, layout.ext_len)?.as_slice())
            } else {
                None
            };
            Ok(WiiReport::Data(WiiData {
                buttons,
                accel,
                extension,
            }))
        }
    }
}

/// Battery byte from a status report (or the board's extension block).
pub fn battery_from_raw(raw: u8) -> u8 {
    if raw == 0 {
        return BATTERY_EMPTY;
    }
    let scaled = u16::from(raw).min(BATTERY_RAW_FULL) * u16::from(BATTERY_FULL) / BATTERY_RAW_FULL;
    u8::try_from(scaled).unwrap_or(BATTERY_FULL).max(BATTERY_EMPTY)
}

fn map_buttons(out: &mut u16, raw: u16, map: &[(u16, u16)]) {
    for &(bit, button) in map {
        if raw & bit != 0 {
            *out |= button;
        }
    }
}

fn apply_accel(gp: &mut Gamepad, accel: Option<[u16; 3]>) {
    if let Some(accel) = accel {
        gp.accel = accel.map(|v| i32::from(v) - ACCEL_CENTER);
    }
}

/// Bare remote held horizontally, d-pad on the left.
pub fn remote_to_gamepad(data: &WiiData<'_>) -> Gamepad {
    let mut gp = Gamepad::default();
    let b = data.buttons;
    for (bit, dir) in [
        (buttons::UP, gamepad::DPAD_LEFT),
        (buttons::DOWN, gamepad::DPAD_RIGHT),
        (buttons::LEFT, gamepad::DPAD_DOWN),
        (buttons::RIGHT, gamepad::DPAD_UP),
    ] {
        if b & bit != 0 {
            gp.dpad |= dir;
        }
    }
    map_buttons(&mut gp.buttons, b, &[
        (buttons::TWO, gamepad::BUTTON_A),
        (buttons::ONE, gamepad::BUTTON_B),
        (buttons::B, gamepad::BUTTON_X),
        (buttons::A, gamepad::BUTTON_Y),
    ]);
    map_misc(&mut gp, b);
    apply_accel(&mut gp, data.accel);
    gp
}

fn map_misc(gp: &mut Gamepad, b: u16) {
    map_buttons(&mut gp.misc_buttons, b, &[
        (buttons::MINUS, gamepad::MISC_SELECT),
        (buttons::PLUS, gamepad::MISC_START),
        (buttons::HOME, gamepad::MISC_SYSTEM),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NunchukState {
    pub stick_x: u8,
    pub stick_y: u8,
    pub c: bool,
    pub z: bool,
}

impl NunchukState {
    /// Parse the first 6 extension bytes. Button bits are active low.
    pub fn parse(ext: &[u8]) -> Result<Self, DecodeError> {
        let r = ReportReader::new("nunchuk", ext).require(6)?;
        let bits = r.u8_at(5)?;
        Ok(Self {
            stick_x: r.u8_at(0)?,
            stick_y: r.u8_at(1)?,
            z: bits & 0x01 == 0,
            c: bits & 0x02 == 0,
        })
    }
}

/// Remote held vertically with the Nunchuk stick as the left stick.
pub fn remote_with_nunchuk_to_gamepad(data: &WiiData<'_>, nunchuk: &NunchukState) -> Gamepad {
    let mut gp = Gamepad {
        axis_x: clamp_axis(axis_from_u8(nunchuk.stick_x)),
        axis_y: clamp_axis(-axis_from_u8(nunchuk.stick_y)),
        ..Gamepad::default()
    };
    let b = data.buttons;
    for (bit, dir) in [
        (buttons::UP, gamepad::DPAD_UP),
        (buttons::DOWN, gamepad::DPAD_DOWN),
        (buttons::LEFT, gamepad::DPAD_LEFT),
        (buttons::RIGHT, gamepad::DPAD_RIGHT),
    ] {
        if b & bit != 0 {
            gp.dpad |= dir;
        }
    }
    map_buttons(&mut gp.buttons, b, &[
        (buttons::A, gamepad::BUTTON_A),
        (buttons::B, gamepad::BUTTON_B),
        (buttons::ONE, gamepad::BUTTON_X),
        (buttons::TWO, gamepad::BUTTON_Y),
    ]);
    if nunchuk.c {
        gp.buttons |= gamepad::BUTTON_SHOULDER_L;
    }
    if nunchuk.z {
        gp.buttons |= gamepad::BUTTON_TRIGGER_L;
        gp.brake = PEDAL_MAX;
    }
    map_misc(&mut gp, b);
    apply_accel(&mut gp, data.accel);
    gp
}

/// Balance Board sensors from the extension block, plus its battery byte.
pub fn parse_balance_board(ext: &[u8]) -> Result<(BalanceBoard, u8), DecodeError> {
    let r = ReportReader::new("balance_board", ext).require(11)?;
    let board = BalanceBoard {
        tr: r.u16_be_at(0)?,
        br: r.u16_be_at(2)?,
        tl: r.u16_be_at(4)?,
        bl: r.u16_be_at(6)?,
        temperature: r.u8_at(8)?,
    };
    Ok((board, battery_from_raw(r.u8_at(10)?)))
}
