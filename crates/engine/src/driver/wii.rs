//! Wii Remote and Balance Board driver.
//!
//! Setup asks for a status report, initialises and identifies any
//! extension, then selects the data reporting mode that carries what the
//! extension needs. A status report arriving later (extension plugged or
//! unplugged) restarts detection. Status, ack and read replies carry no
//! stick or sensor data, so the driver re-emits its last snapshot for them.
#![deny(static_mut_refs)]

use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_model::{
    BATTERY_NOT_AVAILABLE, Controller, ControllerClass, ControllerData, RumbleRequest,
};
use tracing::{debug, info, warn};

use super::{
    Capabilities, ControllerDriver, DriverFamily, OutputSink, PlayerLeds, Rumble, SetupStatus,
    timed_rumble,
};

pub use padbridge_hid_wii_protocol::{
    NunchukState, SetupAction, WiiData, WiiExtension, WiiReport, WiiSetup, build_leds_report,
    build_rumble_report, names, parse_balance_board, parse_input_report, remote_to_gamepad,
    remote_with_nunchuk_to_gamepad,
};

pub struct WiiDriver {
    product_id: u16,
    setup: WiiSetup,
    is_balance_board: bool,
    battery: u8,
    last: ControllerData,
    pending_error: Option<TransportError>,
}

impl WiiDriver {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let is_balance_board = identity.name.contains(names::BALANCE_BOARD);
        debug!(
            "Created WiiDriver VID=0x{:04X} PID=0x{:04X} balance_board={}",
            identity.vendor_id, identity.product_id, is_balance_board
        );
        let mut driver = Self {
            product_id: identity.product_id,
            setup: WiiSetup::default(),
            is_balance_board,
            battery: BATTERY_NOT_AVAILABLE,
            last: ControllerData::None,
            pending_error: None,
        };
        driver.last = driver.empty_data();
        driver
    }

    pub fn extension(&self) -> WiiExtension {
        self.setup.extension
    }

    fn empty_data(&self) -> ControllerData {
        let mut ctl = Controller::default();
        ctl.reset(self.class());
        ctl.data
    }

    fn run_setup_action(&mut self, action: SetupAction, sink: &mut OutputSink<'_>) {
        let (output, finished) = match action {
            SetupAction::Wait => return,
            SetupAction::Send(output) => (output, false),
            SetupAction::Finish(output) => (output, true),
        };
        if finished {
            if self.setup.extension == WiiExtension::BalanceBoard {
                self.is_balance_board = true;
            }
            if let WiiExtension::Unsupported(id) = self.setup.extension {
                warn!(
                    "Wii PID=0x{:04X} extension {:02X?} not supported, using the bare remote",
                    self.product_id, id
                );
            }
            info!(
                "Wii PID=0x{:04X} ready, extension {:?}",
                self.product_id, self.setup.extension
            );
            self.last = self.empty_data();
        }
        if let Err(e) = sink.send(output.as_slice()) {
            warn!(
                "Wii PID=0x{:04X} setup report 0x{:02X} failed: {}",
                self.product_id,
                output.report_id(),
                e
            );
            self.pending_error = Some(e);
        }
    }

    fn decode_data(&mut self, data: &WiiData<'_>) -> Result<ControllerData, DecodeError> {
        // A board known by name decodes as one before its extension is identified.
        if self.is_balance_board || self.setup.extension == WiiExtension::BalanceBoard {
            let ext = data.extension.ok_or_else(|| {
                DecodeError::malformed("wii", "balance board report without extension bytes")
            })?;
            let (board, battery) = parse_balance_board(ext)?;
            self.battery = battery;
            return Ok(ControllerData::BalanceBoard(board));
        }
        match (self.setup.extension, data.extension) {
            (WiiExtension::Nunchuk, Some(ext)) => {
                let nunchuk = NunchukState::parse(ext)?;
                Ok(ControllerData::Gamepad(remote_with_nunchuk_to_gamepad(
                    data, &nunchuk,
                )))
            }
            _ => Ok(ControllerData::Gamepad(remote_to_gamepad(data))),
        }
    }
}

impl ControllerDriver for WiiDriver {
    fn family(&self) -> DriverFamily {
        DriverFamily::Wii
    }

    fn class(&self) -> ControllerClass {
        if self.is_balance_board {
            ControllerClass::BalanceBoard
        } else {
            ControllerClass::Gamepad
        }
    }

    fn setup(&mut self, sink: &mut OutputSink<'_>) -> Result<SetupStatus, TransportError> {
        self.battery = BATTERY_NOT_AVAILABLE;
        self.last = self.empty_data();
        self.pending_error = None;
        let request = self.setup.start();
        sink.send(request.as_slice())?;
        Ok(SetupStatus::Negotiating)
    }

    fn is_ready(&self) -> bool {
        self.setup.is_ready()
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
        let parsed = parse_input_report(report)?;
        match parsed {
            WiiReport::Data(data) => {
                self.last = self.decode_data(&data)?;
            }
            WiiReport::Status(status) => {
                if !self.is_balance_board {
                    self.battery = status.battery();
                }
                let action = self.setup.on_report(&parsed);
                self.run_setup_action(action, sink);
            }
            WiiReport::ReadReply { .. } | WiiReport::Ack { .. } => {
                let action = self.setup.on_report(&parsed);
                self.run_setup_action(action, sink);
            }
        }
        controller.data = self.last.clone();
        controller.battery = self.battery;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        if self.is_balance_board {
            Capabilities::PLAYER_LEDS
        } else {
            Capabilities::RUMBLE | Capabilities::PLAYER_LEDS
        }
    }

    fn rumble(&mut self) -> Option<&mut dyn Rumble> {
        if self.is_balance_board { None } else { Some(self) }
    }

    fn player_leds(&mut self) -> Option<&mut dyn PlayerLeds> {
        Some(self)
    }
}

impl Rumble for WiiDriver {
    /// The motor is on/off only; any non-zero magnitude turns it on.
    fn play_dual_rumble(
        &mut self,
        sink: &mut OutputSink<'_>,
        request: RumbleRequest,
    ) -> Result<(), TransportError> {
        let on = build_rumble_report(true);
        let off = build_rumble_report(false);
        timed_rumble(sink, &request, on.as_slice(), off.as_slice())
    }
}

impl PlayerLeds for WiiDriver {
    fn set_player_leds(&mut self, sink: &mut OutputSink<'_>, mask: u8) -> Result<(), TransportError> {
        sink.send(build_leds_report(mask, false).as_slice())
    }
}
