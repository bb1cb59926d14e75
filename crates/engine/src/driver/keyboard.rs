//! HID keyboard driver.
//!
//! Usage driven when the host supplies a report layout; otherwise the boot
//! protocol report is decoded directly.
//!
//! Some cheap BLE "page turner" remotes (sold as BLE-M3) present themselves
//! as keyboards but report a touch contact as absolute X/Y plus a tip switch.
//! For those the driver tracks the contact and turns each release into a key:
//! a short contact is Enter, a swipe is the arrow key of its dominant axis.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::usage::{desktop, digitizer, key, page};
use padbridge_hid_common::{DeviceIdentity, HidGlobals, ReportReader};
use padbridge_model::{Controller, ControllerClass, Keyboard};
use tracing::{debug, warn};

use super::{ControllerDriver, DriverFamily, OutputSink, SetupStatus};

/// Boot keyboard input report id when the device uses report ids.
pub const BOOT_REPORT_ID: u8 = 0x01;
const BOOT_REPORT_LEN: usize = 9;

/// Contact travel (logical units, either axis) below which a release counts
/// as a tap.
pub const SWIPE_THRESHOLD: i32 = 40;

const BLE_M3_NAME: &str = "BLE-M3";

/// Touch contact tracking for the BLE-M3 quirk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Contact {
    position: (i32, i32),
    touching: bool,
    start: Option<(i32, i32)>,
}

impl Contact {
    /// Key produced by this report, if the contact was just released.
    fn resolve(&mut self) -> Option<u8> {
        match (self.touching, self.start) {
            (true, None) => {
                self.start = Some(self.position);
                None
            }
            (false, Some((x0, y0))) => {
                self.start = None;
                let dx = self.position.0 - x0;
                let dy = self.position.1 - y0;
                Some(gesture_key(dx, dy))
            }
            _ => None,
        }
    }
}

fn gesture_key(dx: i32, dy: i32) -> u8 {
    if dx.abs() < SWIPE_THRESHOLD && dy.abs() < SWIPE_THRESHOLD {
        key::ENTER
    } else if dx.abs() >= dy.abs() {
        if dx > 0 { key::RIGHT_ARROW } else { key::LEFT_ARROW }
    } else if dy > 0 {
        key::DOWN_ARROW
    } else {
        key::UP_ARROW
    }
}

pub struct KeyboardDriver {
    product_id: u16,
    ble_m3: bool,
    contact: Contact,
}

impl KeyboardDriver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let ble_m3 = identity.name.contains(BLE_M3_NAME);
        debug!(
            "Created KeyboardDriver VID=0x{:04X} PID=0x{:04X} ble_m3={}",
            identity.vendor_id, identity.product_id, ble_m3
        );
        Self {
            product_id: identity.product_id,
            ble_m3,
            contact: Contact::default(),
        }
    }

    pub fn is_ble_m3(&self) -> bool {
        self.ble_m3
    }

    fn press(&self, kb: &mut Keyboard, usage: u8) {
        if let Err(e) = kb.pressed_keys.push(usage) {
            warn!(
                "Keyboard PID=0x{:04X} dropped key 0x{:02X}: {}",
                self.product_id, usage, e
            );
        }
    }
}

impl ControllerDriver for KeyboardDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Keyboard
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Keyboard
    }

    fn setup(&mut self, _sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.contact = Contact::default();
        Ok(SetupStatus::Complete)
    }

    fn is_usage_driven(&self) -> bool {
        true
    }

    /// Boot protocol: `[0x01] modifiers, reserved, key[6]`.
    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        let r = ReportReader::new("keyboard", report);
        let id = r.report_id()?;
        if id != BOOT_REPORT_ID {
            return Err(DecodeError::unknown_report("keyboard", id));
        }
        let r = r.require(BOOT_REPORT_LEN)?;
        let modifiers = r.u8_at(1)?;
        let keys: [u8; 6] = r.bytes_at(3)?;

        let Some(kb) = controller.keyboard_mut() else {
            return Err(DecodeError::malformed("keyboard", "controller is not a keyboard"));
        };
        kb.modifiers = modifiers;
        for usage in keys {
            if u16::from(usage) > key::ERROR_UNDEFINED {
                self.press(kb, usage);
            }
        }
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
        match (usage_page, usage) {
            (page::KEYBOARD, key::LEFT_CONTROL..=key::RIGHT_GUI) => {
                if value != 0 {
                    if let Some(kb) = controller.keyboard_mut() {
                        kb.modifiers |= 1u8 << (usage - key::LEFT_CONTROL);
                    }
                }
            }
            (page::KEYBOARD, key::NO_EVENT..=key::ERROR_UNDEFINED) => {}
            (page::KEYBOARD, _) => {
                let Ok(code) = u8::try_from(usage) else {
                    return;
                };
                if value == 0 {
                    return;
                }
                if let Some(kb) = controller.keyboard_mut() {
                    self.press(kb, code);
                }
            }
            (page::GENERIC_DESKTOP, desktop::X) if self.ble_m3 => self.contact.position.0 = value,
            (page::GENERIC_DESKTOP, desktop::Y) if self.ble_m3 => self.contact.position.1 = value,
            (page::DIGITIZER, digitizer::TIP_SWITCH) if self.ble_m3 => {
                self.contact.touching = value != 0;
            }
            _ => {}
        }
    }

    fn finish_usage_report(&mut self, controller: &mut Controller) {
        if !self.ble_m3 {
            return;
        }
        if let Some(code) = self.contact.resolve() {
            debug!(
                "Keyboard PID=0x{:04X} touch gesture -> key 0x{:02X}",
                self.product_id, code
            );
            if let Some(kb) = controller.keyboard_mut() {
                self.press(kb, code);
            }
        }
    }
}
