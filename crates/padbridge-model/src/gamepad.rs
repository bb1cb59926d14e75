//! Gamepad arm of the canonical state.

use serde::{Deserialize, Serialize};

pub const BUTTON_A: u16 = 1 << 0;
pub const BUTTON_B: u16 = 1 << 1;
pub const BUTTON_X: u16 = 1 << 2;
pub const BUTTON_Y: u16 = 1 << 3;
pub const BUTTON_SHOULDER_L: u16 = 1 << 4;
pub const BUTTON_SHOULDER_R: u16 = 1 << 5;
pub const BUTTON_TRIGGER_L: u16 = 1 << 6;
pub const BUTTON_TRIGGER_R: u16 = 1 << 7;
pub const BUTTON_THUMB_L: u16 = 1 << 8;
pub const BUTTON_THUMB_R: u16 = 1 << 9;

/// System / home / PS / guide.
pub const MISC_SYSTEM: u16 = 1 << 0;
/// Select / back / share / create / minus.
pub const MISC_SELECT: u16 = 1 << 1;
/// Start / menu / options / plus.
pub const MISC_START: u16 = 1 << 2;
/// Capture / touchpad click / mute.
pub const MISC_CAPTURE: u16 = 1 << 3;

pub const DPAD_UP: u8 = 0x01;
pub const DPAD_DOWN: u8 = 0x02;
pub const DPAD_RIGHT: u8 = 0x04;
pub const DPAD_LEFT: u8 = 0x08;

/// Analog sticks span this many steps, centered on zero.
pub const AXIS_NORMALIZE_RANGE: i32 = 1024;
pub const AXIS_MIN: i32 = -(AXIS_NORMALIZE_RANGE / 2);
pub const AXIS_MAX: i32 = AXIS_NORMALIZE_RANGE / 2 - 1;
/// Brake and throttle span `0..=PEDAL_MAX`.
pub const PEDAL_MAX: i32 = 1023;

/// Gamepad snapshot. Axes are in `AXIS_MIN..=AXIS_MAX`, +Y points down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gamepad {
    pub dpad: u8,
    pub axis_x: i32,
    pub axis_y: i32,
    pub axis_rx: i32,
    pub axis_ry: i32,
    pub brake: i32,
    pub throttle: i32,
    pub buttons: u16,
    pub misc_buttons: u16,
    pub gyro: [i32; 3],
    pub accel: [i32; 3],
}

impl Gamepad {
    pub fn pressed(&self, mask: u16) -> bool {
        self.buttons & mask != 0
    }

    pub fn misc_pressed(&self, mask: u16) -> bool {
        self.misc_buttons & mask != 0
    }

    pub fn dpad_pressed(&self, mask: u8) -> bool {
        self.dpad & mask != 0
    }
}

/// 8-bit stick centered on 128.
pub fn axis_from_u8(raw: u8) -> i32 {
    (i32::from(raw) - 128) * 4
}

/// 8-bit analog trigger.
pub fn pedal_from_u8(raw: u8) -> i32 {
    i32::from(raw) * 4
}

/// Clamp into the canonical stick range.
pub fn clamp_axis(value: i32) -> i32 {
    value.clamp(AXIS_MIN, AXIS_MAX)
}

/// Clamp into the canonical pedal range.
pub fn clamp_pedal(value: i32) -> i32 {
    value.clamp(0, PEDAL_MAX)
}

/// Hat switch with 0 = north, clockwise, to a dpad mask. Anything outside
/// `0..=7` is neutral.
pub fn dpad_from_hat(hat: u8) -> u8 {
    match hat {
        0 => DPAD_UP,
        1 => DPAD_UP | DPAD_RIGHT,
        2 => DPAD_RIGHT,
        3 => DPAD_RIGHT | DPAD_DOWN,
        4 => DPAD_DOWN,
        5 => DPAD_DOWN | DPAD_LEFT,
        6 => DPAD_LEFT,
        7 => DPAD_LEFT | DPAD_UP,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_u8() {
        assert_eq!(axis_from_u8(0), AXIS_MIN);
        assert_eq!(axis_from_u8(128), 0);
        assert_eq!(axis_from_u8(255), 508);
    }

    #[test]
    fn test_pedal_from_u8() {
        assert_eq!(pedal_from_u8(0), 0);
        assert_eq!(pedal_from_u8(255), 1020);
    }

    #[test]
    fn test_dpad_from_hat() {
        assert_eq!(dpad_from_hat(0), DPAD_UP);
        assert_eq!(dpad_from_hat(3), DPAD_DOWN | DPAD_RIGHT);
        assert_eq!(dpad_from_hat(7), DPAD_UP | DPAD_LEFT);
        assert_eq!(dpad_from_hat(8), 0);
        assert_eq!(dpad_from_hat(0x0F), 0);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_axis(10_000), AXIS_MAX);
        assert_eq!(clamp_axis(-10_000), AXIS_MIN);
        assert_eq!(clamp_pedal(-3), 0);
        assert_eq!(clamp_pedal(4000), PEDAL_MAX);
    }
}
