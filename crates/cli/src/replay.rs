//! Capture replay through the lifecycle manager.
//!
//! Output reports go to a transport that only logs them. The application
//! turns every committed snapshot into a joystick frame and owns the seat
//! toggle: a system-button press moves that device to the next seat.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use padbridge_engine::properties::balance_board_thresholds;
use padbridge_engine::{
    Allowlist, Application, Delivery, DeviceInfo, DeviceManager, MemoryPropertyStore, OobEvent,
    PropertyStore,
};
use padbridge_errors::TransportError;
use padbridge_hid_common::{DeviceHandle, Transport};
use padbridge_joystick::{
    BalanceBoardState, BalanceBoardThresholds, Joystick, KeyboardMode, TwoButtonMode,
    from_keyboard, single_from_gamepad,
};
use padbridge_model::{Controller, ControllerData, Seat};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::capture::{Capture, CaptureEvent};
use crate::hex::parse_hex_bytes;

/// Transport that logs every output report and counts them.
#[derive(Debug, Default)]
pub struct LoggingTransport {
    sent: AtomicUsize,
}

impl LoggingTransport {
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl Transport for LoggingTransport {
    fn send_output_report(&self, handle: DeviceHandle, report: &[u8]) -> Result<(), TransportError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        info!("-> device {} output {:02X?}", handle, report);
        Ok(())
    }

    fn send_output_report_after(
        &self,
        handle: DeviceHandle,
        delay_ms: u32,
        report: &[u8],
    ) -> Result<(), TransportError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        info!("-> device {} output +{}ms {:02X?}", handle, delay_ms, report);
        Ok(())
    }

    fn request_feature_report(&self, handle: DeviceHandle, report_id: u8) -> Result<(), TransportError> {
        info!("-> device {} feature request 0x{:02X}", handle, report_id);
        Ok(())
    }
}

/// One joystick sample produced by a committed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub handle: DeviceHandle,
    pub seat: Option<Seat>,
    pub joystick: Joystick,
}

#[derive(Default)]
struct AppState {
    pending_toggles: Vec<DeviceHandle>,
    boards: HashMap<DeviceHandle, BalanceBoardState>,
    frames: Vec<Frame>,
}

pub struct ReplayApp {
    thresholds: Option<BalanceBoardThresholds>,
    state: Mutex<AppState>,
}

impl ReplayApp {
    pub fn new(thresholds: Option<BalanceBoardThresholds>) -> Self {
        Self {
            thresholds,
            state: Mutex::new(AppState::default()),
        }
    }

    fn take_toggles(&self) -> Vec<DeviceHandle> {
        std::mem::take(&mut self.state.lock().pending_toggles)
    }

    fn take_frames(&self) -> Vec<Frame> {
        std::mem::take(&mut self.state.lock().frames)
    }

    fn joystick(&self, state: &mut AppState, handle: DeviceHandle, controller: &Controller) -> Option<Joystick> {
        match &controller.data {
            ControllerData::Gamepad(gp) => Some(single_from_gamepad(gp, TwoButtonMode::Classic)),
            ControllerData::Keyboard(kb) => Some(from_keyboard(kb, KeyboardMode::Single).0),
            ControllerData::BalanceBoard(bb) => {
                let thresholds = self.thresholds.as_ref()?;
                Some(state.boards.entry(handle).or_default().update(bb, thresholds))
            }
            _ => None,
        }
    }
}

impl Application for ReplayApp {
    fn on_device_ready(&self, info: &DeviceInfo) -> Result<(), String> {
        info!(
            "{} ready as {} in seat {:?}",
            info.name,
            info.family.map_or_else(|| "?".to_string(), |f| f.to_string()),
            info.seat
        );
        Ok(())
    }

    fn on_device_disconnected(&self, info: &DeviceInfo) {
        self.state.lock().boards.remove(&info.handle);
    }

    fn on_controller_data(&self, info: &DeviceInfo, controller: &Controller) {
        let mut state = self.state.lock();
        if let Some(joystick) = self.joystick(&mut state, info.handle, controller) {
            state.frames.push(Frame {
                handle: info.handle,
                seat: info.seat,
                joystick,
            });
        }
    }

    fn on_oob_event(&self, event: OobEvent) {
        if let OobEvent::SystemButton { handle } = event {
            self.state.lock().pending_toggles.push(handle);
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub events: usize,
    pub committed: usize,
    pub dropped: usize,
    pub errors: usize,
    pub seat_toggles: usize,
    pub output_reports: usize,
}

#[derive(Debug, Serialize)]
pub struct ReplayOutcome {
    pub stats: ReplayStats,
    pub devices: Vec<DeviceInfo>,
    pub frames: Vec<Frame>,
}

/// Feed every event of `capture` through a fresh manager.
pub fn run(capture: Capture) -> Result<ReplayOutcome> {
    let store = MemoryPropertyStore::new();
    for (key, value) in capture.properties {
        store.set_property(&key, value)?;
    }
    capture.config.validate()?;
    let allowlist = Allowlist::load(&store, capture.config.allowlist_capacity)?;
    let thresholds = match balance_board_thresholds(&store) {
        Ok(t) => Some(t),
        Err(e) => {
            debug!("Balance board joystick disabled: {}", e);
            None
        }
    };

    let transport = Arc::new(LoggingTransport::default());
    let app = Arc::new(ReplayApp::new(thresholds));
    let manager = DeviceManager::new(capture.config, transport.clone(), app.clone())
        .with_allowlist(allowlist);

    let mut stats = ReplayStats::default();
    for (index, event) in capture.events.into_iter().enumerate() {
        stats.events += 1;
        match apply(&manager, event) {
            Ok(Some(Delivery::Committed)) => stats.committed += 1,
            Ok(Some(Delivery::Dropped(e))) => {
                debug!("Event {} dropped: {}", index, e);
                stats.dropped += 1;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Event {} failed: {}", index, e);
                stats.errors += 1;
            }
        }
        for handle in app.take_toggles() {
            if toggle_seat(&manager, handle) {
                stats.seat_toggles += 1;
            }
        }
    }

    stats.output_reports = transport.sent();
    Ok(ReplayOutcome {
        stats,
        devices: manager.devices(),
        frames: app.take_frames(),
    })
}

fn apply(manager: &DeviceManager, event: CaptureEvent) -> Result<Option<Delivery>> {
    match event {
        CaptureEvent::Discovered {
            address,
            name,
            class_of_device,
            rssi,
        } => {
            let decision = manager.on_device_discovered(address, &name, class_of_device, rssi);
            info!("{} '{}': {:?}", address, name, decision);
        }
        CaptureEvent::Connected { handle, identity } => {
            manager.on_device_connected(handle, identity.into())?;
        }
        CaptureEvent::Ready { handle } => manager.on_device_ready(handle)?,
        CaptureEvent::Input { handle, report } => {
            let bytes = parse_hex_bytes(&report)?;
            return Ok(Some(manager.deliver_input_report(handle, &bytes)?));
        }
        CaptureEvent::Feature { handle, report } => {
            let bytes = parse_hex_bytes(&report)?;
            return Ok(Some(manager.deliver_feature_report(handle, &bytes)?));
        }
        CaptureEvent::Rumble { handle, request } => manager.play_dual_rumble(handle, request)?,
        CaptureEvent::RadioEnabled => manager.on_oob_event(OobEvent::RadioEnabled),
        CaptureEvent::RadioDisabled => manager.on_oob_event(OobEvent::RadioDisabled),
        CaptureEvent::Disconnected { handle } => {
            manager.on_device_disconnected(handle)?;
        }
    }
    Ok(None)
}

fn toggle_seat(manager: &DeviceManager, handle: DeviceHandle) -> bool {
    let Some(info) = manager.device_info(handle) else {
        return false;
    };
    let next = info.seat.map_or(Seat::A, Seat::next);
    match manager.set_seat(handle, next) {
        Ok(()) => {
            info!("{} toggled to seat {:?}", info.name, next);
            true
        }
        Err(e) => {
            warn!("{} could not move to seat {:?}: {}", info.name, next, e);
            false
        }
    }
}
