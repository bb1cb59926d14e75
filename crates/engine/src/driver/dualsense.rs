//! DualSense driver.
//!
//! Same negotiation as the DualShock 4 (feature report `0x05`), plus player
//! LEDs and adaptive triggers. Every output report carries a 4-bit sequence
//! number that the driver owns.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_model::{
    Controller, ControllerClass, ControllerData, Rgb, RumbleRequest, TriggerEffect, TriggerSide,
};
use tracing::{debug, info};

use super::{
    AdaptiveTriggers, Capabilities, ControllerDriver, DriverFamily, Lightbar, OutputSink,
    PlayerLeds, Rumble, SetupStatus, timed_rumble,
};

pub use padbridge_hid_sony_protocol::{
    DualSenseOutput, OUTPUT_REPORT_LEN, SonyModel, build_dualsense_output_report,
    dualsense_player_pattern, parse_dualsense_report, report_ids,
};

pub struct DualSenseDriver {
    vendor_id: u16,
    product_id: u16,
    model: SonyModel,
    negotiated: bool,
    seq: u8,
}

impl DualSenseDriver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let model = match SonyModel::from_product_id(identity.product_id) {
            SonyModel::Unknown | SonyModel::DualShock4 => SonyModel::DualSense,
            m => m,
        };
        debug!(
            "Created DualSenseDriver VID=0x{:04X} PID=0x{:04X} model={:?}",
            identity.vendor_id, identity.product_id, model
        );
        Self {
            vendor_id: identity.vendor_id,
            product_id: identity.product_id,
            model,
            negotiated: false,
            seq: 0,
        }
    }

    pub fn model(&self) -> SonyModel {
        self.model
    }

    fn build(&mut self, req: &DualSenseOutput) -> [u8; OUTPUT_REPORT_LEN] {
        let report = build_dualsense_output_report(self.seq, req);
        self.seq = (self.seq + 1) & 0x0F;
        report
    }

    fn mark_negotiated(&mut self) {
        if !self.negotiated {
            info!(
                "DualSense VID=0x{:04X} PID=0x{:04X} switched to full reports",
                self.vendor_id, self.product_id
            );
        }
        self.negotiated = true;
    }
}

impl ControllerDriver for DualSenseDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::DualSense
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Gamepad
    }

    fn setup(&mut self, sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.negotiated = false;
        self.seq = 0;
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
        let state = parse_dualsense_report(report)?;
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
            Some(&other) => Err(DecodeError::unknown_report("dualsense", other)),
            None => Err(DecodeError::truncated("dualsense", 1, 0)),
        }
    }

    fn capabilities(&self) -> Capabilities {
        let caps = Capabilities::RUMBLE | Capabilities::LIGHTBAR | Capabilities::PLAYER_LEDS;
        if self.model.has_adaptive_triggers() {
            caps | Capabilities::ADAPTIVE_TRIGGERS
        } else {
            caps
        }
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        Some(self)
    }

    fn player_leds(&mut self) -> Option<&mut dyn PlayerLeds> {
        Some(self)
    }

    fn lightbar(&mut self) -> Option<&mut dyn Lightbar> {
        Some(self)
    }

    fn adaptive_triggers(&mut self) -> Option<&mut dyn AdaptiveTriggers> {
        if self.model.has_adaptive_triggers() {
            Some(self)
        } else {
            None
        }
    }
}

impl Rumble for DualSenseDriver {
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError> {
        let on = self.build(&DualSenseOutput {
            rumble: Some((request.weak_magnitude, request.strong_magnitude)),
            ..DualSenseOutput::default()
        });
        let off = self.build(&DualSenseOutput {
            rumble: Some((0, 0)),
            ..DualSenseOutput::default()
        });
        timed_rumble(sink, &request, &on, &off)
    }
}

impl PlayerLeds for DualSenseDriver {
    fn set_player_leds(&mut self, sink: &mut OutputSink<'_>, mask: u8) -> Result<(), TransportError> {
        let report = self.build(&DualSenseOutput {
            player_leds: Some(dualsense_player_pattern(mask)),
            ..DualSenseOutput::default()
        });
        sink.send(&report)
    }
}

impl Lightbar for DualSenseDriver {
    fn set_lightbar_color(
        &mut self,
        sink: &mut OutputSink<'_>,
        color: Rgb,
    ) -> Result<(), TransportError> {
        let report = self.build(&DualSenseOutput {
            lightbar: Some(color),
            ..DualSenseOutput::default()
        });
        sink.send(&report)
    }
}

impl AdaptiveTriggers for DualSenseDriver {
    fn set_trigger_effect(
        &mut self,
        sink: &mut OutputSink<'_>,
        side: TriggerSide,
        effect: TriggerEffect,
    ) -> Result<(), TransportError> {
        let req = match side {
            TriggerSide::Left => DualSenseOutput {
                left_trigger: Some(effect),
                ..DualSenseOutput::default()
            },
            TriggerSide::Right => DualSenseOutput {
                right_trigger: Some(effect),
                ..DualSenseOutput::default()
            },
        };
        let report = self.build(&req);
        sink.send(&report)
    }
}
