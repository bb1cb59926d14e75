//! DualShock 4 driver.
//!
//! Out of the box a DS4 on Bluetooth sends the reduced `0x01` report.
//! Reading the calibration feature report switches it to the full `0x11`
//! report with motion data and battery status; negotiation is done when
//! either the feature reply or the first full report arrives. Pure encoding
//! and parsing is delegated to `padbridge-hid-sony-protocol`.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_model::{Controller, ControllerClass, ControllerData, Rgb, RumbleRequest};
use tracing::{debug, info};

use super::{
    Capabilities, ControllerDriver, DriverFamily, Lightbar, OutputSink, Rumble, SetupStatus,
    timed_rumble,
};

pub use padbridge_hid_sony_protocol::{
    Ds4Output, SonyModel, build_ds4_output_report, parse_ds4_report, report_ids,
};

pub struct Ds4Driver {
    vendor_id: u16,
    product_id: u16,
    negotiated: bool,
}

impl Ds4Driver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        debug!(
            "Created Ds4Driver VID=0x{:04X} PID=0x{:04X} model={:?}",
            identity.vendor_id,
            identity.product_id,
            SonyModel::from_product_id(identity.product_id)
        );
        Self {
            vendor_id: identity.vendor_id,
            product_id: identity.product_id,
            negotiated: false,
        }
    }

    fn mark_negotiated(&mut self) {
        if !self.negotiated {
            info!(
                "DS4 VID=0x{:04X} PID=0x{:04X} switched to full reports",
                self.vendor_id, self.product_id
            );
        }
        self.negotiated = true;
    }
}

impl ControllerDriver for Ds4Driver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Ds4
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Gamepad
    }

    fn setup(&mut self, sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.negotiated = false;
        sink.request_feature(report_ids::CALIBRATION_FEATURE)?;
        Ok(SetupStatus::Negotiating)
    }

    fn is_ready(&self) -> bool {
        self.negotiated
    }

    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        let state = parse_ds4_report(report)?;
        if state.full_report {
            self.mark_negotiated();
        }
        controller.data = ControllerData::Gamepad(state.to_gamepad());
        controller.battery = state.battery();
        Ok(())
    }

    fn parse_feature_report(
        &mut self,
        _controller: &mut Controller,
        report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        match report.first() {
            Some(&report_ids::CALIBRATION_FEATURE) => {
                self.mark_negotiated();
                Ok(())
            }
            Some(&other) => Err(DecodeError::unknown_report("ds4", other)),
            None => Err(DecodeError::truncated("ds4", 1, 0)),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RUMBLE | Capabilities::LIGHTBAR
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        Some(self)
    }

    fn lightbar(&mut self) -> Option<&mut dyn Lightbar> {
        Some(self)
    }
}

impl Rumble for Ds4Driver {
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError> {
        let on = build_ds4_output_report(&Ds4Output {
            rumble: Some((request.weak_magnitude, request.strong_magnitude)),
            lightbar: None,
        });
        let off = build_ds4_output_report(&Ds4Output {
            rumble: Some((0, 0)),
            lightbar: None,
        });
        timed_rumble(sink, &request, &on, &off)
    }
}

impl Lightbar for Ds4Driver {
    fn set_lightbar_color(
        &mut self,
        sink: &mut OutputSink<'_>,
        color: Rgb,
    ) -> Result<(), TransportError> {
        sink.send(&build_ds4_output_report(&Ds4Output {
            rumble: None,
            lightbar: Some(color),
        }))
    }
}
