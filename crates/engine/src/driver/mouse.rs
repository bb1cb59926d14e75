//! HID mouse driver.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::usage::{desktop, page};
use padbridge_hid_common::{HidGlobals, ReportReader};
use padbridge_model::{Controller, ControllerClass};

use super::{ControllerDriver, DriverFamily, OutputSink, SetupStatus};

/// Boot mouse input report id when the device uses report ids.
pub const BOOT_REPORT_ID: u8 = 0x02;
const BOOT_REPORT_LEN: usize = 4;

#[derive(Debug, Default)]
pub struct MouseDriver;

impl MouseDriver {
    pub fn new() -> Self {
        Self
    }
}

fn clamp_wheel(value: i32) -> i8 {
    i8::try_from(value.clamp(i32::from(i8::MIN), i32::from(i8::MAX))).unwrap_or_default()
}

impl ControllerDriver for MouseDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Mouse
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Mouse
    }

    fn setup(&mut self, _sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        Ok(SetupStatus::Complete)
    }

    fn is_usage_driven(&self) -> bool {
        true
    }

    /// Boot protocol: `[0x02] buttons, dx, dy[, wheel]`.
    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        let r = ReportReader::new("mouse", report);
        let id = r.report_id()?;
        if id != BOOT_REPORT_ID {
            return Err(DecodeError::unknown_report("mouse", id));
        }
        let r = r.require(BOOT_REPORT_LEN)?;
        let buttons = r.u8_at(1)?;
        let dx = r.i8_at(2)?;
        let dy = r.i8_at(3)?;
        let wheel = r.i8_at(4).unwrap_or(0);

        let Some(mouse) = controller.mouse_mut() else {
            return Err(DecodeError::malformed("mouse", "controller is not a mouse"));
        };
        mouse.buttons = u16::from(buttons);
        mouse.delta_x = i32::from(dx);
        mouse.delta_y = i32::from(dy);
        mouse.scroll_wheel = wheel;
        Ok(())
    }

    fn parse_usage(
        &mut self,
        controller: &mut Controller,
        _globals: &HidGlobals,
        usage_page: u16,
        usage: u16,
        value: i32,
    ) {
        let Some(mouse) = controller.mouse_mut() else {
            return;
        };
        match (usage_page, usage) {
            (page::GENERIC_DESKTOP, desktop::X) => mouse.delta_x = mouse.delta_x.saturating_add(value),
            (page::GENERIC_DESKTOP, desktop::Y) => mouse.delta_y = mouse.delta_y.saturating_add(value),
            (page::GENERIC_DESKTOP, desktop::WHEEL) => mouse.scroll_wheel = clamp_wheel(value),
            (page::BUTTON, 1..=16) if value != 0 => mouse.buttons |= 1 << (usage - 1),
            // AC Pan (horizontal scroll) has no canonical field
            _ => {}
        }
    }
}
