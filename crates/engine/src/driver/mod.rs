//! Controller drivers
//!
//! One driver per controller family. A driver owns the decoder for the
//! family's input reports, the encoders for whatever outputs the hardware
//! supports, and any private state the protocol needs between reports
//! (negotiation progress, sequence counters, calibration). The engine creates
//! a fresh driver through [`create_driver`] when a device binds and drops it
//! on disconnect.
#![deny(static_mut_refs)]

pub mod ds4;
pub mod dualsense;
pub mod generic;
pub mod keyboard;
pub mod mouse;
pub mod switch;
pub mod wii;
pub mod xbox;

#[cfg(test)]
mod ds4_tests;
#[cfg(test)]
mod switch_tests;
#[cfg(test)]
mod wii_tests;

use std::fmt;

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::{DeviceHandle, DeviceIdentity, HidGlobals, ReportLayout, Transport};
use padbridge_model::{
    Controller, ControllerClass, Rgb, RumbleRequest, TriggerEffect, TriggerSide,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outgoing report path for one device.
///
/// Drivers only ever talk to the transport through a sink, which pins the
/// device handle.
pub struct OutputSink<'a> {
    transport: &'a dyn Transport,
    handle: DeviceHandle,
}

impl<'a> OutputSink<'a> {
    pub fn new(transport: &'a dyn Transport, handle: DeviceHandle) -> Self {
        Self { transport, handle }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }

    pub fn send(&mut self, report: &[u8]) -> Result<(), TransportError> {
        trace!(handle = self.handle, len = report.len(), "send output report");
        self.transport.send_output_report(self.handle, report)
    }

    pub fn send_after(&mut self, delay_ms: u32, report: &[u8]) -> Result<(), TransportError> {
        trace!(
            handle = self.handle,
            delay_ms,
            len = report.len(),
            "schedule output report"
        );
        self.transport
            .send_output_report_after(self.handle, delay_ms, report)
    }

    pub fn request_feature(&mut self, report_id: u8) -> Result<(), TransportError> {
        trace!(handle = self.handle, report_id, "request feature report");
        self.transport.request_feature_report(self.handle, report_id)
    }
}

/// Outcome of [`ControllerDriver::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    /// The device is usable now.
    Complete,
    /// Requests are in flight; the driver turns ready once replies arrive.
    Negotiating,
}

/// Output features a bound driver supports.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    pub const RUMBLE: Self = Self(1 << 0);
    pub const PLAYER_LEDS: Self = Self(1 << 1);
    pub const LIGHTBAR: Self = Self(1 << 2);
    pub const ADAPTIVE_TRIGGERS: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Names of the set capabilities, for logs and the CLI.
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::RUMBLE, "rumble"),
            (Self::PLAYER_LEDS, "player_leds"),
            (Self::LIGHTBAR, "lightbar"),
            (Self::ADAPTIVE_TRIGGERS, "adaptive_triggers"),
        ]
        .into_iter()
        .filter(|(cap, _)| self.contains(*cap))
        .map(|(_, name)| name)
        .collect()
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capabilities({})", self.names().join("|"))
    }
}

pub trait Rumble {
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError>;
}

pub trait PlayerLeds {
    /// `mask` has one bit per player LED, bit 0 leftmost.
    fn set_player_leds(&mut self, sink: &mut OutputSink<'_>, mask: u8)
    -> Result<(), TransportError>;
}

pub trait Lightbar {
    fn set_lightbar_color(&mut self, sink: &mut OutputSink<'_>, color: Rgb)
    -> Result<(), TransportError>;
}

pub trait AdaptiveTriggers {
    fn set_trigger_effect(
        &mut self,
        sink: &mut OutputSink<'_>,
        side: TriggerSide,
        effect: TriggerEffect,
    ) -> Result<(), TransportError>;
}

/// Decoder and encoder pair for one controller family.
pub trait ControllerDriver: Send {
    fn family(&self) -> DriverFamily;

    /// Class of the canonical record this driver fills.
    fn class(&self) -> ControllerClass;

    /// Reset private state and start any negotiation the device needs.
    fn setup(&mut self, sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError>;

    /// Whether negotiation started by [`setup`](Self::setup) has finished.
    fn is_ready(&self) -> bool {
        true
    }

    /// A negotiation send that failed while a report was being decoded.
    /// Draining it hands the failure to the lifecycle.
    fn take_transport_error(&mut self) -> Option<TransportError> {
        None
    }

    /// Zero `controller` and tag it with this driver's class.
    fn init_report(&self, controller: &mut Controller) {
        controller.reset(self.class());
    }

    fn parse_input_report(
        &mut self,
        controller: &mut Controller,
        report: &[u8],
        sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError>;

    /// Feature report replies. Families that never request one ignore them.
    fn parse_feature_report(
        &mut self,
        _controller: &mut Controller,
        _report: &[u8],
        _sink: &mut OutputSink<'_>,
    ) -> Result<(), DecodeError> {
        Ok(())
    }

    /// One usage from a descriptor-driven report.
    fn parse_usage(
        &mut self,
        _controller: &mut Controller,
        _globals: &HidGlobals,
        _usage_page: u16,
        _usage: u16,
        _value: i32,
    ) {
    }

    /// Called once after the last usage of a report has been delivered.
    fn finish_usage_report(&mut self, _controller: &mut Controller) {}

    /// Whether input is decoded through the device's resolved report layout.
    fn is_usage_driven(&self) -> bool {
        false
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        None
    }

    fn player_leds(&mut self) -> Option<&mut dyn PlayerLeds> {
        None
    }

    fn lightbar(&mut self) -> Option<&mut dyn Lightbar> {
        None
    }

    fn adaptive_triggers(&mut self) -> Option<&mut dyn AdaptiveTriggers> {
        None
    }
}

/// Walk `report` through `layout`, feeding every usage to `driver`.
pub fn dispatch_usages(
    driver: &mut dyn ControllerDriver,
    layout: &ReportLayout,
    controller: &mut Controller,
    report: &[u8],
) -> Result<usize, DecodeError> {
    let count = layout.for_each_usage(report, |globals, page, usage, value| {
        driver.parse_usage(controller, globals, page, usage, value);
    })?;
    driver.finish_usage_report(controller);
    Ok(count)
}

/// Send `on` now (or after the start delay) and schedule `off` at the end of
/// the effect. Used by families whose reports carry no timing of their own.
pub(crate) fn timed_rumble(
    sink: &mut OutputSink<'_>,
    request: &RumbleRequest,
    on: &[u8],
    off: &[u8],
) -> Result<(), TransportError> {
    if request.is_off() {
        return sink.send(off);
    }
    if request.start_delay_ms > 0 {
        sink.send_after(u32::from(request.start_delay_ms), on)?;
    } else {
        sink.send(on)?;
    }
    if request.duration_ms > 0 {
        sink.send_after(request.stop_at_ms(), off)?;
    }
    Ok(())
}

/// Controller family a device binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverFamily {
    Ds4,
    #[serde(rename = "dualsense")]
    DualSense,
    Xbox,
    Switch,
    Wii,
    #[serde(rename = "generic")]
    GenericGamepad,
    Keyboard,
    Mouse,
}

impl DriverFamily {
    pub const ALL: [DriverFamily; 8] = [
        DriverFamily::Ds4,
        DriverFamily::DualSense,
        DriverFamily::Xbox,
        DriverFamily::Switch,
        DriverFamily::Wii,
        DriverFamily::GenericGamepad,
        DriverFamily::Keyboard,
        DriverFamily::Mouse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DriverFamily::Ds4 => "ds4",
            DriverFamily::DualSense => "dualsense",
            DriverFamily::Xbox => "xbox",
            DriverFamily::Switch => "switch",
            DriverFamily::Wii => "wii",
            DriverFamily::GenericGamepad => "generic",
            DriverFamily::Keyboard => "keyboard",
            DriverFamily::Mouse => "mouse",
        }
    }
}

impl fmt::Display for DriverFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create the driver for `family`, specialised for `identity` where the
/// family has model variants.
pub fn create_driver(family: DriverFamily, identity: &DeviceIdentity) -> Box<dyn ControllerDriver> {
    match family {
        DriverFamily::Ds4 => Box::new(ds4::Ds4Driver::new(identity)),
        DriverFamily::DualSense => Box::new(dualsense::DualSenseDriver::new(identity)),
        DriverFamily::Xbox => Box::new(xbox::XboxDriver::new(identity)),
        DriverFamily::Switch => Box::new(switch::SwitchDriver::new(identity)),
        DriverFamily::Wii => Box::new(wii::WiiDriver::new(identity)),
        DriverFamily::GenericGamepad => Box::new(generic::GenericGamepadDriver::new()),
        DriverFamily::Keyboard => Box::new(keyboard::KeyboardDriver::new(identity)),
        DriverFamily::Mouse => Box::new(mouse::MouseDriver::new()),
    }
}
