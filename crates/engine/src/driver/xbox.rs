//! Xbox Wireless Controller driver.
//!
//! The pad splits its state over three reports: sticks and buttons in
//! `0x01`, the guide button in `0x02` and the battery in `0x04`. The driver
//! remembers the latest of each so every report still yields a complete
//! snapshot. No negotiation; rumble timing is native.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_model::gamepad::MISC_SYSTEM;
use padbridge_model::{BATTERY_NOT_AVAILABLE, Controller, ControllerClass, ControllerData, RumbleRequest};
use tracing::debug;

use super::{Capabilities, ControllerDriver, DriverFamily, OutputSink, Rumble, SetupStatus};

pub use padbridge_hid_xbox_protocol::{
    XboxInputState, XboxModel, XboxReport, build_rumble_report, parse_input_report,
};
use padbridge_hid_xbox_protocol::input::battery_from_level;

pub struct XboxDriver {
    model: XboxModel,
    last: XboxInputState,
    guide: bool,
    battery: u8,
}

impl XboxDriver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let model = XboxModel::from_product_id(identity.product_id);
        debug!(
            "Created XboxDriver VID=0x{:04X} PID=0x{:04X} model={:?}",
            identity.vendor_id, identity.product_id, model
        );
        Self {
            model,
            last: neutral(),
            guide: false,
            battery: BATTERY_NOT_AVAILABLE,
        }
    }

    pub fn model(&self) -> XboxModel {
        self.model
    }
}

fn neutral() -> XboxInputState {
    XboxInputState {
        lx: 0x8000,
        ly: 0x8000,
        rx: 0x8000,
        ry: 0x8000,
        ..XboxInputState::default()
    }
}

impl ControllerDriver for XboxDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Xbox
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Gamepad
    }

    fn setup(&mut self, _sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.last = neutral();
        self.guide = false;
        self.battery = BATTERY_NOT_AVAILABLE;
        Ok(SetupStatus::Complete)
    }

    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        match parse_input_report(report)? {
            XboxReport::Gamepad(state) => self.last = state,
            XboxReport::Guide(pressed) => self.guide = pressed,
            XboxReport::Battery(level) => self.battery = battery_from_level(level),
        }

        let mut gp = self.last.to_gamepad();
        if self.guide {
            gp.misc_buttons |= MISC_SYSTEM;
        }
        controller.data = ControllerData::Gamepad(gp);
        controller.battery = self.battery;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RUMBLE
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        Some(self)
    }
}

impl Rumble for XboxDriver {
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError> {
        sink.send(&build_rumble_report(&request))
    }
}
