//! Switch Pro Controller and Joy-Con driver.
//!
//! Setup walks a fixed subcommand sequence, one request per acknowledged
//! reply: device info, factory stick calibration, IMU, vibration, then the
//! full `0x30` input mode. Until the last step is acknowledged the pad may
//! still send simple `0x3F` reports, which are dropped. Every output report
//! carries a 4-bit packet counter owned by the driver.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_model::{Controller, ControllerClass, ControllerData, RumbleRequest};
use tracing::{debug, info, warn};

use super::{
    Capabilities, ControllerDriver, DriverFamily, OutputSink, PlayerLeds, Rumble, SetupStatus,
    timed_rumble,
};

pub use padbridge_hid_nintendo_protocol::{
    SetupStep, StickCalibration, SwitchInputState, SwitchModel, SwitchReport,
    build_player_lights_report, build_rumble_report, parse_factory_stick_calibration,
    parse_input_report, parse_spi_read_reply,
};
use padbridge_hid_nintendo_protocol::ids::spi;

/// Bit 7 of the ack byte flags a successful subcommand.
const ACK_OK: u8 = 0x80;

pub struct SwitchDriver {
    vendor_id: u16,
    product_id: u16,
    model: SwitchModel,
    step: SetupStep,
    counter: u8,
    left_cal: StickCalibration,
    right_cal: StickCalibration,
    /// Setup request that failed while decoding a reply.
    pending_error: Option<TransportError>,
}

impl SwitchDriver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let model = model_for(identity);
        debug!(
            "Created SwitchDriver VID=0x{:04X} PID=0x{:04X} model={:?}",
            identity.vendor_id, identity.product_id, model
        );
        Self {
            vendor_id: identity.vendor_id,
            product_id: identity.product_id,
            model,
            step: SetupStep::FIRST,
            counter: 0,
            left_cal: StickCalibration::default(),
            right_cal: StickCalibration::default(),
            pending_error: None,
        }
    }

    pub fn model(&self) -> SwitchModel {
        self.model
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn calibration(&self) -> (StickCalibration, StickCalibration) {
        (self.left_cal, self.right_cal)
    }

    fn next_counter(&mut self) -> u8 {
        let c = self.counter;
        self.counter = (self.counter + 1) & 0x0F;
        c
    }

    fn send_step(&mut self, sink: &mut OutputSink<'_>) -> Result<(), TransportError> {
        let counter = self.next_counter();
        match self.step.build_request(counter) {
            Some(report) => {
                debug!(
                    "Switch PID=0x{:04X} setup step {:?}",
                    self.product_id, self.step
                );
                sink.send(&report)
            }
            None => Ok(()),
        }
    }

    fn on_subcommand_reply(
        &mut self,
        ack: u8,
        subcommand: u8,
        data: &[u8],
        sink: &mut OutputSink<'_>,
    ) {
        if self.step.subcommand() != Some(subcommand) {
            debug!(
                "Switch PID=0x{:04X} ignoring reply to subcommand 0x{:02X} during {:?}",
                self.product_id, subcommand, self.step
            );
            return;
        }
        if ack & ACK_OK == 0 {
            warn!(
                "Switch PID=0x{:04X} subcommand 0x{:02X} not acknowledged (ack=0x{:02X})",
                self.product_id, subcommand, ack
            );
        }

        if self.step == SetupStep::ReadStickCalibration {
            self.apply_calibration(data);
        }

        self.step = self.step.next();
        if self.step.is_done() {
            info!(
                "Switch VID=0x{:04X} PID=0x{:04X} setup complete",
                self.vendor_id, self.product_id
            );
            return;
        }
        if let Err(e) = self.send_step(sink) {
            warn!(
                "Switch PID=0x{:04X} setup request {:?} failed: {}",
                self.product_id, self.step, e
            );
            self.pending_error = Some(e);
        }
    }

    fn apply_calibration(&mut self, data: &[u8]) {
        let parsed = parse_spi_read_reply(data)
            .filter(|(address, _)| *address == spi::FACTORY_STICK_CALIBRATION)
            .and_then(|(_, payload)| parse_factory_stick_calibration(payload));
        match parsed {
            Some((left, right)) => {
                self.left_cal = left;
                self.right_cal = right;
            }
            None => debug!(
                "Switch PID=0x{:04X} has no factory stick calibration, using defaults",
                self.product_id
            ),
        }
    }
}

fn model_for(identity: &DeviceIdentity) -> SwitchModel {
    match SwitchModel::from_product_id(identity.product_id) {
        SwitchModel::Unknown if identity.name.contains("(L)") => SwitchModel::JoyConLeft,
        SwitchModel::Unknown if identity.name.contains("(R)") => SwitchModel::JoyConRight,
        model => model,
    }
}

impl ControllerDriver for SwitchDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Switch
    }

    fn class(&self) -> ControllerClass {
        ControllerClass::Gamepad
    }

    fn setup(&mut self, sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.step = SetupStep::FIRST;
        self.counter = 0;
        self.left_cal = StickCalibration::default();
        self.right_cal = StickCalibration::default();
        self.pending_error = None;
        self.send_step(sink)?;
        Ok(SetupStatus::Negotiating)
    }

    fn is_ready(&self) -> bool {
        self.step.is_done()
    }

    fn take_transport_error(&mut self) -> Option<TransportError> {
        self.pending_error.take()
    }

    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        let state = match parse_input_report(report)? {
            SwitchReport::Input(state) => state,
            SwitchReport::SubcommandReply {
                state,
                ack,
                subcommand,
                data,
            } => {
                self.on_subcommand_reply(ack, subcommand, data, sink);
                state
            }
        };
        controller.data = ControllerData::Gamepad(state.to_gamepad(
            self.model,
            &self.left_cal,
            &self.right_cal,
        ));
        controller.battery = state.battery();
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RUMBLE | Capabilities::PLAYER_LEDS
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        Some(self)
    }

    fn player_leds(&mut self) -> Option<&mut dyn PlayerLeds> {
        Some(self)
    }
}

impl Rumble for SwitchDriver {
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError> {
        let on = build_rumble_report(
            self.next_counter(),
            request.weak_magnitude,
            request.strong_magnitude,
        );
        let off = build_rumble_report(self.next_counter(), 0, 0);
        timed_rumble(sink, &request, &on, &off)
    }
}

impl PlayerLeds for SwitchDriver {
    fn set_player_leds(&mut self, sink: &mut OutputSink<'_>, mask: u8) -> Result<(), TransportError> {
        let counter = self.next_counter();
        sink.send(&build_player_lights_report(counter, mask))
    }
}
