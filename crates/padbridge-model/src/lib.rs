//! Canonical controller state
//!
//! Every vendor decoder converges on [`Controller`]: a class-tagged record
//! holding exactly one of a gamepad, mouse, keyboard or balance board snapshot
//! plus a battery level. Reports are full snapshots, so a decode cycle always
//! starts from [`Controller::reset`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod balance_board;
pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod output;
pub mod seat;

pub use balance_board::BalanceBoard;
pub use gamepad::Gamepad;
pub use keyboard::{Keyboard, PressedKeys};
pub use mouse::Mouse;
pub use output::{Rgb, RumbleRequest, TriggerEffect, TriggerSide};
pub use seat::Seat;

use serde::{Deserialize, Serialize};

/// Battery level unknown or not reported.
pub const BATTERY_NOT_AVAILABLE: u8 = 0;
/// Lowest reportable level.
pub const BATTERY_EMPTY: u8 = 1;
/// Fully charged.
pub const BATTERY_FULL: u8 = 255;

/// Which arm of [`ControllerData`] is live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerClass {
    #[default]
    None,
    Gamepad,
    Mouse,
    Keyboard,
    BalanceBoard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum ControllerData {
    #[default]
    None,
    Gamepad(Gamepad),
    Mouse(Mouse),
    Keyboard(Keyboard),
    BalanceBoard(BalanceBoard),
}

/// Canonical controller snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub battery: u8,
    pub data: ControllerData,
}

impl Controller {
    pub fn new(class: ControllerClass) -> Self {
        let mut ctl = Self::default();
        ctl.reset(class);
        ctl
    }

    /// Zero every field and make `class` the live arm.
    pub fn reset(&mut self, class: ControllerClass) {
        self.battery = BATTERY_NOT_AVAILABLE;
        self.data = match class {
            ControllerClass::None => ControllerData::None,
            ControllerClass::Gamepad => ControllerData::Gamepad(Gamepad::default()),
            ControllerClass::Mouse => ControllerData::Mouse(Mouse::default()),
            ControllerClass::Keyboard => ControllerData::Keyboard(Keyboard::default()),
            ControllerClass::BalanceBoard => {
                ControllerData::BalanceBoard(BalanceBoard::default())
            }
        };
    }

    pub fn class(&self) -> ControllerClass {
        match self.data {
            ControllerData::None => ControllerClass::None,
            ControllerData::Gamepad(_) => ControllerClass::Gamepad,
            ControllerData::Mouse(_) => ControllerClass::Mouse,
            ControllerData::Keyboard(_) => ControllerClass::Keyboard,
            ControllerData::BalanceBoard(_) => ControllerClass::BalanceBoard,
        }
    }

    pub fn gamepad(&self) -> Option<&Gamepad> {
        match &self.data {
            ControllerData::Gamepad(gp) => Some(gp),
            _ => None,
        }
    }

    pub fn gamepad_mut(&mut self) -> Option<&mut Gamepad> {
        match &mut self.data {
            ControllerData::Gamepad(gp) => Some(gp),
            _ => None,
        }
    }

    pub fn mouse(&self) -> Option<&Mouse> {
        match &self.data {
            ControllerData::Mouse(m) => Some(m),
            _ => None,
        }
    }

    pub fn mouse_mut(&mut self) -> Option<&mut Mouse> {
        match &mut self.data {
            ControllerData::Mouse(m) => Some(m),
            _ => None,
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match &self.data {
            ControllerData::Keyboard(kb) => Some(kb),
            _ => None,
        }
    }

    pub fn keyboard_mut(&mut self) -> Option<&mut Keyboard> {
        match &mut self.data {
            ControllerData::Keyboard(kb) => Some(kb),
            _ => None,
        }
    }

    pub fn balance_board(&self) -> Option<&BalanceBoard> {
        match &self.data {
            ControllerData::BalanceBoard(bb) => Some(bb),
            _ => None,
        }
    }

    pub fn balance_board_mut(&mut self) -> Option<&mut BalanceBoard> {
        match &mut self.data {
            ControllerData::BalanceBoard(bb) => Some(bb),
            _ => None,
        }
    }

    /// Whether the system/home button is held, for any class that has one.
    pub fn system_pressed(&self) -> bool {
        match &self.data {
            ControllerData::Gamepad(gp) => gp.misc_buttons & gamepad::MISC_SYSTEM != 0,
            ControllerData::Mouse(m) => m.misc_buttons & gamepad::MISC_SYSTEM as u8 != 0,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_switches_arm_and_zeroes() {
        let mut ctl = Controller::new(ControllerClass::Gamepad);
        if let Some(gp) = ctl.gamepad_mut() {
            gp.buttons = gamepad::BUTTON_A;
            gp.axis_x = 100;
        }
        ctl.battery = 200;

        ctl.reset(ControllerClass::Gamepad);
        assert_eq!(ctl.gamepad(), Some(&Gamepad::default()));
        assert_eq!(ctl.battery, BATTERY_NOT_AVAILABLE);

        ctl.reset(ControllerClass::Keyboard);
        assert_eq!(ctl.class(), ControllerClass::Keyboard);
        assert!(ctl.gamepad().is_none());
        assert!(ctl.keyboard().is_some());
    }

    #[test]
    fn test_system_pressed() {
        let mut ctl = Controller::new(ControllerClass::Gamepad);
        assert!(!ctl.system_pressed());
        if let Some(gp) = ctl.gamepad_mut() {
            gp.misc_buttons |= gamepad::MISC_SYSTEM;
        }
        assert!(ctl.system_pressed());
        assert!(!Controller::new(ControllerClass::Keyboard).system_pressed());
    }

    #[test]
    fn test_json_shape_is_class_tagged() -> Result<(), Box<dyn std::error::Error>> {
        let ctl = Controller::new(ControllerClass::BalanceBoard);
        let json = serde_json::to_value(&ctl)?;
        assert_eq!(json["data"]["class"], "balance_board");
        assert_eq!(json["battery"], 0);
        let back: Controller = serde_json::from_value(json)?;
        assert_eq!(back, ctl);
        Ok(())
    }
}
