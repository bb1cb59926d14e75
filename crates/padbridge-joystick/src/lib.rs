//! Legacy joystick emulation.
//!
//! Maps canonical controller state onto the signals of a classic digital
//! joystick: four directions, fire, auto-fire, two extra buttons and two
//! paddle pots. Everything here is a pure function of its input except
//! [`BalanceBoardState`], which keeps per-board smoothing and jump detection
//! across samples.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod balance_board;
pub mod gamepad;
pub mod keyboard;

pub use balance_board::{BalanceBoardState, BalanceBoardThresholds, FireState};
pub use gamepad::{single_from_gamepad, single_from_wii_accel, twin_from_gamepad};
pub use keyboard::from_keyboard;

use serde::{Deserialize, Serialize};

/// Stick deflection past which a direction is asserted.
pub const AXIS_THRESHOLD: i32 = 128;

/// Level of button2/button3 while held.
pub const BUTTON_PRESSED: u8 = 0xFF;

/// Digital joystick snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Joystick {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub auto_fire: bool,
    pub button2: u8,
    pub button3: u8,
    pub pot_x: u8,
    pub pot_y: u8,
}

impl Joystick {
    /// Merge another joystick's signals into this one.
    pub fn merge(&mut self, other: &Joystick) {
        self.up |= other.up;
        self.down |= other.down;
        self.left |= other.left;
        self.right |= other.right;
        self.fire |= other.fire;
        self.auto_fire |= other.auto_fire;
        self.button2 = self.button2.max(other.button2);
        self.button3 = self.button3.max(other.button3);
        self.pot_x = self.pot_x.max(other.pot_x);
        self.pot_y = self.pot_y.max(other.pot_y);
    }

    pub fn is_idle(&self) -> bool {
        *self == Joystick::default()
    }
}

/// How the second face button of a gamepad is used in single-joystick mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoButtonMode {
    /// B acts as "up", for games that jump with up.
    #[default]
    Classic,
    /// B drives button2.
    TwoButton,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardMode {
    /// One joystick, arrows plus fire keys.
    #[default]
    Single,
    /// Two joysticks, arrows for port 1 and WASD for port 2.
    Twin,
}

pub(crate) fn button_level(pressed: bool) -> u8 {
    if pressed { BUTTON_PRESSED } else { 0 }
}
