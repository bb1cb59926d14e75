//! Generic HID gamepad driver.
//!
//! Decodes any gamepad or joystick whose report descriptor the host has
//! resolved. Usages are mapped onto the canonical gamepad; logical ranges are
//! rescaled so every axis lands in the same range as the vendor drivers.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::HidGlobals;
use padbridge_hid_common::usage::{consumer, desktop, page, simulation};
use padbridge_model::gamepad::{
    self, AXIS_MAX, AXIS_MIN, DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT, DPAD_UP, PEDAL_MAX, dpad_from_hat,
};
use padbridge_model::{Controller, ControllerClass, Gamepad};

use super::{ControllerDriver, DriverFamily, OutputSink, SetupStatus};

/// Button page usages 1..=14 in order.
const BUTTON_MAP: [(u16, bool); 14] = [
    (gamepad::BUTTON_A, false),
    (gamepad::BUTTON_B, false),
    (gamepad::BUTTON_X, false),
    (gamepad::BUTTON_Y, false),
    (gamepad::BUTTON_SHOULDER_L, false),
    (gamepad::BUTTON_SHOULDER_R, false),
    (gamepad::BUTTON_TRIGGER_L, false),
    (gamepad::BUTTON_TRIGGER_R, false),
    (gamepad::MISC_SELECT, true),
    (gamepad::MISC_START, true),
    (gamepad::BUTTON_THUMB_L, false),
    (gamepad::BUTTON_THUMB_R, false),
    (gamepad::MISC_SYSTEM, true),
    (gamepad::MISC_CAPTURE, true),
];

#[derive(Debug, Default)]
pub struct GenericGamepadDriver;

impl GenericGamepadDriver {
    pub fn new() -> Self {
        Self
    }
}

fn axis(globals: &HidGlobals, value: i32) -> i32 {
    globals.scale(value, AXIS_MIN, AXIS_MAX)
}

fn pedal(globals: &HidGlobals, value: i32) -> i32 {
    globals.scale(value, 0, PEDAL_MAX)
}

fn set_button(gp: &mut Gamepad, index: u16, pressed: bool) {
    if !pressed || index == 0 {
        return;
    }
    let Some(&(mask, misc)) = BUTTON_MAP.get(usize::from(index - 1)) else {
        return;
    };
    if misc {
        gp.misc_buttons |= mask;
    } else {
        gp.buttons |= mask;
    }
}

fn hat(globals: &HidGlobals, value: i32) -> u8 {
    value
        .checked_sub(globals.logical_min)
        .and_then(|v| u8::try_from(v).ok())
        .map_or(0, dpad_from_hat)
}

impl ControllerDriver for GenericGamepadDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::GenericGamepad
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Gamepad
    }

    fn setup(&mut self, _sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        Ok(SetupStatus::Complete)
    }

    fn is_usage_driven(&self) -> bool {
        true
    }

    fn parse_input_report(
        &mut self,
        _controller: &mut Controller,
        _report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        Err(DecodeError::MissingLayout { family: "generic" })
    }

    fn parse_usage(
        &mut self,
        controller: &mut Controller,
        globals: &HidGlobals,
        usage_page: u16,
        usage: u16,
        value: i32,
    ) {
        let Some(gp) = controller.gamepad_mut() else {
            return;
        };
        match (usage_page, usage) {
            (page::GENERIC_DESKTOP, desktop::X) => gp.axis_x = axis(globals, value),
            (page::GENERIC_DESKTOP, desktop::Y) => gp.axis_y = axis(globals, value),
            (page::GENERIC_DESKTOP, desktop::Z) => gp.axis_rx = axis(globals, value),
            (page::GENERIC_DESKTOP, desktop::RZ) => gp.axis_ry = axis(globals, value),
            (page::GENERIC_DESKTOP, desktop::RX) => gp.brake = pedal(globals, value),
            (page::GENERIC_DESKTOP, desktop::RY) => gp.throttle = pedal(globals, value),
            (page::GENERIC_DESKTOP, desktop::HAT_SWITCH) => gp.dpad |= hat(globals, value),
            (page::GENERIC_DESKTOP, desktop::DPAD_UP) if value != 0 => gp.dpad |= DPAD_UP,
            (page::GENERIC_DESKTOP, desktop::DPAD_DOWN) if value != 0 => gp.dpad |= DPAD_DOWN,
            (page::GENERIC_DESKTOP, desktop::DPAD_RIGHT) if value != 0 => gp.dpad |= DPAD_RIGHT,
            (page::GENERIC_DESKTOP, desktop::DPAD_LEFT) if value != 0 => gp.dpad |= DPAD_LEFT,
            (page::GENERIC_DESKTOP, desktop::SYSTEM_MAIN_MENU) if value != 0 => {
                gp.misc_buttons |= gamepad::MISC_SYSTEM;
            }
            (page::SIMULATION, simulation::BRAKE) => gp.brake = pedal(globals, value),
            (page::SIMULATION, simulation::ACCELERATOR) => gp.throttle = pedal(globals, value),
            (page::BUTTON, index) => set_button(gp, index, value != 0),
            (page::CONSUMER, consumer::AC_HOME) if value != 0 => {
                gp.misc_buttons |= gamepad::MISC_SYSTEM;
            }
            (page::CONSUMER, consumer::AC_BACK) if value != 0 => {
                gp.misc_buttons |= gamepad::MISC_SELECT;
            }
            (page::CONSUMER, consumer::MENU) if value != 0 => {
                gp.misc_buttons |= gamepad::MISC_START;
            }
            _ => {}
        }
    }
}
