//! Device lifecycle manager
//!
//! Tracks every device from discovery to disconnect:
//!
//! ```text
//! Discovered -> Connecting -> Ready -> Connected -> Disconnected
//! ```
//!
//! A device is bound to a driver family once its identity is known; the
//! binding holds until disconnect. Input reports are decoded into a fresh
//! record and only committed when the driver accepts them, so a bad report
//! never clobbers the last good snapshot.
//!
//! Locking: the device map is a `RwLock`, each record has its own `Mutex`,
//! and the seat table is locked last. Application callbacks run with no
//! lock held, so an application may call back into the manager.
#![deny(static_mut_refs)]

use std::collections::HashMap;
use std::sync::Arc;

use padbridge_errors::{DecodeError, LifecycleError, OutputError, TransportError};
use padbridge_hid_common::{BdAddr, ClassOfDevice, DeviceHandle, DeviceIdentity, Transport};
use padbridge_model::{Controller, Rgb, RumbleRequest, Seat, TriggerEffect, TriggerSide};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::allowlist::Allowlist;
use crate::binding::resolve_family;
use crate::config::{EngineConfig, MAX_SEATS};
use crate::driver::{
    Capabilities, ControllerDriver, DriverFamily, OutputSink, SetupStatus, create_driver,
    dispatch_usages,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Discovered,
    Connecting,
    Ready,
    Connected,
    Disconnected,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Discovered => "discovered",
            LifecycleState::Connecting => "connecting",
            LifecycleState::Ready => "ready",
            LifecycleState::Connected => "connected",
            LifecycleState::Disconnected => "disconnected",
        }
    }

    /// Ready or Connected: the device accepts output and feeds the
    /// application.
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleState::Ready | LifecycleState::Connected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotAllowlisted,
    NotPeripheral,
    KeyboardsDisabled,
    MiceDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryDecision {
    Accept,
    Reject(RejectReason),
}

/// Events that do not belong to one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum OobEvent {
    RadioEnabled,
    RadioDisabled,
    /// The system/home button of a device went down.
    SystemButton { handle: DeviceHandle },
}

/// Snapshot of a device record handed to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub handle: DeviceHandle,
    pub address: BdAddr,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub family: Option<DriverFamily>,
    pub state: LifecycleState,
    pub seat: Option<Seat>,
    pub capabilities: Capabilities,
}

/// Result of delivering one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The report decoded and is now the device's snapshot.
    Committed,
    /// The report was dropped; the previous snapshot stands.
    Dropped(DecodeError),
}

impl Delivery {
    pub fn is_committed(&self) -> bool {
        matches!(self, Delivery::Committed)
    }
}

/// Hooks into the host application. Every method has a no-op default.
pub trait Application: Send + Sync {
    /// Last word on a device that finished setup. An `Err` rejects it.
    fn on_device_ready(&self, _info: &DeviceInfo) -> Result<(), String> {
        Ok(())
    }

    fn on_device_disconnected(&self, _info: &DeviceInfo) {}

    fn on_controller_data(&self, _info: &DeviceInfo, _controller: &Controller) {}

    fn on_oob_event(&self, _event: OobEvent) {}
}

/// Application that accepts everything and ignores all callbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullApplication;

impl Application for NullApplication {}

#[derive(Debug, Clone)]
struct DiscoveredDevice {
    name: String,
    class_of_device: ClassOfDevice,
    rssi: i8,
}

struct DeviceRecord {
    handle: DeviceHandle,
    identity: DeviceIdentity,
    state: LifecycleState,
    seat: Option<Seat>,
    controller: Controller,
    driver: Option<Box<dyn ControllerDriver>>,
    system_pressed: bool,
}

impl DeviceRecord {
    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            handle: self.handle,
            address: self.identity.address,
            name: self.identity.display_name(),
            vendor_id: self.identity.vendor_id,
            product_id: self.identity.product_id,
            family: self.driver.as_ref().map(|d| d.family()),
            state: self.state,
            seat: self.seat,
            capabilities: self
                .driver
                .as_ref()
                .map_or(Capabilities::NONE, |d| d.capabilities()),
        }
    }

    fn invalid_state(&self) -> LifecycleError {
        LifecycleError::InvalidState {
            handle: self.handle,
            state: self.state.as_str(),
        }
    }
}

/// Work left to do once the record lock is released.
struct Followup {
    ready: Option<DeviceInfo>,
    system_button: bool,
    data: Option<(DeviceInfo, Controller)>,
}

pub struct DeviceManager {
    config: EngineConfig,
    transport: Arc<dyn Transport>,
    app: Arc<dyn Application>,
    allowlist: Allowlist,
    discovered: RwLock<HashMap<BdAddr, DiscoveredDevice>>,
    devices: RwLock<HashMap<DeviceHandle, Arc<Mutex<DeviceRecord>>>>,
    seats: Mutex<[Option<DeviceHandle>; MAX_SEATS]>,
}

impl DeviceManager {
    pub fn new(
        config: EngineConfig,
        transport: Arc<dyn Transport>,
        app: Arc<dyn Application>,
    ) -> Self {
        info!(
            "Device manager started: max_devices={} accept_keyboards={} accept_mice={}",
            config.max_devices, config.accept_keyboards, config.accept_mice
        );
        Self {
            allowlist: Allowlist::with_capacity(config.allowlist_capacity),
            config,
            transport,
            app,
            discovered: RwLock::new(HashMap::new()),
            devices: RwLock::new(HashMap::new()),
            seats: Mutex::new([None; MAX_SEATS]),
        }
    }

    /// Replace the (empty, disabled) allowlist, typically with one loaded
    /// from properties.
    pub fn with_allowlist(mut self, allowlist: Allowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    fn record(&self, handle: DeviceHandle) -> Option<Arc<Mutex<DeviceRecord>>> {
        self.devices.read().get(&handle).cloned()
    }

    // ----------------------------------------------------------------------
    // Transport -> core
    // ----------------------------------------------------------------------

    /// Inquiry/scan result. Accepted devices are remembered by address so the
    /// connection can pick up the advertised name.
    pub fn on_device_discovered(
        &self,
        address: BdAddr,
        name: &str,
        class_of_device: u32,
        rssi: i8,
    ) -> DiscoveryDecision {
        let cod = ClassOfDevice(class_of_device);
        let decision = if !self.allowlist.is_allowed(&address) {
            DiscoveryDecision::Reject(RejectReason::NotAllowlisted)
        } else if cod.0 != 0 && !cod.is_peripheral() {
            DiscoveryDecision::Reject(RejectReason::NotPeripheral)
        } else if cod.is_bare_keyboard() && !self.config.accept_keyboards {
            DiscoveryDecision::Reject(RejectReason::KeyboardsDisabled)
        } else if cod.is_pointing() && !cod.is_gamepad() && !self.config.accept_mice {
            DiscoveryDecision::Reject(RejectReason::MiceDisabled)
        } else {
            DiscoveryDecision::Accept
        };

        match decision {
            DiscoveryDecision::Accept => {
                debug!(
                    "Discovered {} '{}' cod=0x{:06X} rssi={}",
                    address, name, class_of_device, rssi
                );
                self.discovered.write().insert(
                    address,
                    DiscoveredDevice {
                        name: name.to_string(),
                        class_of_device: cod,
                        rssi,
                    },
                );
            }
            DiscoveryDecision::Reject(reason) => {
                debug!("Ignoring {} '{}': {:?}", address, name, reason);
            }
        }
        decision
    }

    /// Link up. The identity may be incomplete; a pending discovery entry
    /// fills in the name and class of device.
    pub fn on_device_connected(
        &self,
        handle: DeviceHandle,
        identity: DeviceIdentity,
    ) -> Result<(), LifecycleError> {
        let mut identity = identity;
        if let Some(found) = self.discovered.write().remove(&identity.address) {
            if identity.name.is_empty() {
                identity.name = found.name;
            }
            if identity.class_of_device.0 == 0 {
                identity.class_of_device = found.class_of_device;
            }
            debug!("Device {} was discovered at rssi {}", handle, found.rssi);
        }

        let mut devices = self.devices.write();
        if let Some(existing) = devices.get(&handle) {
            return Err(existing.lock().invalid_state());
        }
        if devices.len() >= self.config.max_devices {
            warn!(
                "Device {} refused: {} devices already connected",
                handle,
                devices.len()
            );
            return Err(LifecycleError::Rejected(format!(
                "device limit of {} reached",
                self.config.max_devices
            )));
        }

        info!(
            "Device {} connecting: {} [{}] VID=0x{:04X} PID=0x{:04X}",
            handle,
            identity.display_name(),
            identity.address,
            identity.vendor_id,
            identity.product_id
        );
        devices.insert(
            handle,
            Arc::new(Mutex::new(DeviceRecord {
                handle,
                identity,
                state: LifecycleState::Connecting,
                seat: None,
                controller: Controller::default(),
                driver: None,
                system_pressed: false,
            })),
        );
        Ok(())
    }

    /// Identity is final: bind a driver and run its setup.
    pub fn on_device_ready(&self, handle: DeviceHandle) -> Result<(), LifecycleError> {
        let record = self
            .record(handle)
            .ok_or(LifecycleError::UnknownDevice { handle })?;

        let ready = {
            let mut guard = record.lock();
            let rec = &mut *guard;
            if rec.state != LifecycleState::Connecting || rec.driver.is_some() {
                return Err(rec.invalid_state());
            }
            let Some(family) = resolve_family(&rec.identity) else {
                warn!(
                    "Device {} ({}) VID=0x{:04X} PID=0x{:04X} matches no driver",
                    handle,
                    rec.identity.display_name(),
                    rec.identity.vendor_id,
                    rec.identity.product_id
                );
                return Err(LifecycleError::unresolved(
                    rec.identity.vendor_id,
                    rec.identity.product_id,
                    rec.identity.name.clone(),
                ));
            };

            let mut driver = create_driver(family, &rec.identity);
            let status = {
                let mut sink = OutputSink::new(self.transport.as_ref(), handle);
                driver.setup(&mut sink)?
            };
            driver.init_report(&mut rec.controller);
            rec.driver = Some(driver);

            match status {
                SetupStatus::Complete => Some(self.mark_ready(rec)?),
                SetupStatus::Negotiating => {
                    info!("Device {} bound to {}, negotiating", handle, family);
                    None
                }
            }
        };

        match ready {
            Some(info) => self.admit(&record, info),
            None => Ok(()),
        }
    }

    /// Decode one input report.
    ///
    /// Decode failures are not errors of the lifecycle: the report is
    /// dropped and reported as [`Delivery::Dropped`]. A negotiation request
    /// the driver could not send while handling the report comes back as
    /// [`LifecycleError::Transport`] with the record left in place, so the
    /// transport can drop the link.
    pub fn deliver_input_report(
        &self,
        handle: DeviceHandle,
        report: &[u8],
    ) -> Result<Delivery, LifecycleError> {
        let record = self
            .record(handle)
            .ok_or(LifecycleError::UnknownDevice { handle })?;

        let (delivery, followup) = {
            let mut guard = record.lock();
            let rec = &mut *guard;
            let was_active = rec.state.is_active();
            if !(was_active || rec.state == LifecycleState::Connecting) {
                return Err(rec.invalid_state());
            }
            let Some(driver) = rec.driver.as_mut() else {
                return Err(rec.invalid_state());
            };

            let mut next = rec.controller.clone();
            driver.init_report(&mut next);
            let mut sink = OutputSink::new(self.transport.as_ref(), handle);
            let result = match rec.identity.layout.as_ref() {
                Some(layout) if driver.is_usage_driven() => {
                    dispatch_usages(driver.as_mut(), layout, &mut next, report).map(|_| ())
                }
                _ => driver.parse_input_report(&mut next, report, &mut sink),
            };
            if let Some(e) = driver.take_transport_error() {
                warn!("Device {} negotiation send failed: {}", handle, e);
                return Err(LifecycleError::Transport(e));
            }
            let negotiated = driver.is_ready();

            let delivery = match result {
                Ok(()) => {
                    rec.controller = next;
                    Delivery::Committed
                }
                Err(e) => {
                    debug!("Device {} dropped input report: {}", handle, e);
                    Delivery::Dropped(e)
                }
            };

            let mut followup = Followup {
                ready: None,
                system_button: false,
                data: None,
            };
            if rec.state == LifecycleState::Connecting && negotiated {
                followup.ready = Some(self.mark_ready(rec)?);
            }
            if was_active && delivery.is_committed() {
                if rec.state == LifecycleState::Ready {
                    rec.state = LifecycleState::Connected;
                    info!("Device {} ({}) delivering data", handle, rec.identity.display_name());
                }
                let pressed = rec.controller.system_pressed();
                followup.system_button = pressed && !rec.system_pressed;
                rec.system_pressed = pressed;
                followup.data = Some((rec.info(), rec.controller.clone()));
            }
            (delivery, followup)
        };

        self.run_followup(&record, handle, followup)?;
        Ok(delivery)
    }

    /// Feature report reply (calibration and the like).
    pub fn deliver_feature_report(
        &self,
        handle: DeviceHandle,
        report: &[u8],
    ) -> Result<Delivery, LifecycleError> {
        let record = self
            .record(handle)
            .ok_or(LifecycleError::UnknownDevice { handle })?;

        let (delivery, ready) = {
            let mut guard = record.lock();
            let rec = &mut *guard;
            if !(rec.state.is_active() || rec.state == LifecycleState::Connecting) {
                return Err(rec.invalid_state());
            }
            let Some(driver) = rec.driver.as_mut() else {
                return Err(rec.invalid_state());
            };

            let mut scratch = rec.controller.clone();
            let mut sink = OutputSink::new(self.transport.as_ref(), handle);
            let delivery = match driver.parse_feature_report(&mut scratch, report, &mut sink) {
                Ok(()) => Delivery::Committed,
                Err(e) => {
                    debug!("Device {} dropped feature report: {}", handle, e);
                    Delivery::Dropped(e)
                }
            };
            if let Some(e) = driver.take_transport_error() {
                warn!("Device {} negotiation send failed: {}", handle, e);
                return Err(LifecycleError::Transport(e));
            }
            let negotiated = driver.is_ready();
            let ready = if rec.state == LifecycleState::Connecting && negotiated {
                Some(self.mark_ready(rec)?)
            } else {
                None
            };
            (delivery, ready)
        };

        if let Some(info) = ready {
            self.admit(&record, info)?;
        }
        Ok(delivery)
    }

    /// Radio state changes and similar events from the stack.
    pub fn on_oob_event(&self, event: OobEvent) {
        info!("Out-of-band event {:?}", event);
        self.app.on_oob_event(event);
    }

    /// Link down: drop the record and free its seat.
    pub fn on_device_disconnected(&self, handle: DeviceHandle) -> Result<DeviceInfo, LifecycleError> {
        let record = self
            .devices
            .write()
            .remove(&handle)
            .ok_or(LifecycleError::UnknownDevice { handle })?;

        let info = {
            let mut rec = record.lock();
            rec.state = LifecycleState::Disconnected;
            let info = rec.info();
            if let Some(seat) = rec.seat.take() {
                self.release_seat(seat, handle);
            }
            rec.driver = None;
            info
        };
        info!("Device {} ({}) disconnected", handle, info.name);
        self.app.on_device_disconnected(&info);
        Ok(info)
    }

    // ----------------------------------------------------------------------
    // Output
    // ----------------------------------------------------------------------

    fn with_driver<T>(
        &self,
        handle: DeviceHandle,
        f: impl FnOnce(&mut dyn ControllerDriver, &mut OutputSink<'_>) -> Result<T, OutputError>,
    ) -> Result<T, OutputError> {
        let record = self
            .record(handle)
            .ok_or(OutputError::UnknownDevice { handle })?;
        let mut rec = record.lock();
        if !rec.state.is_active() {
            return Err(OutputError::NotReady { handle });
        }
        let driver = rec
            .driver
            .as_mut()
            .ok_or(OutputError::NotReady { handle })?;
        let mut sink = OutputSink::new(self.transport.as_ref(), handle);
        f(driver.as_mut(), &mut sink)
    }

    pub fn play_dual_rumble(
        &self,
        handle: DeviceHandle,
        request: RumbleRequest,
    ) -> Result<(), OutputError> {
        self.with_driver(handle, |driver, sink| {
            let rumble = driver
                .rumble()
                .ok_or_else(|| OutputError::unsupported("rumble"))?;
            Ok(rumble.play_dual_rumble(sink, request)?)
        })
    }

    pub fn set_player_leds(&self, handle: DeviceHandle, mask: u8) -> Result<(), OutputError> {
        self.with_driver(handle, |driver, sink| {
            let leds = driver
                .player_leds()
                .ok_or_else(|| OutputError::unsupported("player_leds"))?;
            Ok(leds.set_player_leds(sink, mask)?)
        })
    }

    pub fn set_lightbar_color(&self, handle: DeviceHandle, color: Rgb) -> Result<(), OutputError> {
        self.with_driver(handle, |driver, sink| {
            let lightbar = driver
                .lightbar()
                .ok_or_else(|| OutputError::unsupported("lightbar"))?;
            Ok(lightbar.set_lightbar_color(sink, color)?)
        })
    }

    pub fn set_trigger_effect(
        &self,
        handle: DeviceHandle,
        side: TriggerSide,
        effect: TriggerEffect,
    ) -> Result<(), OutputError> {
        self.with_driver(handle, |driver, sink| {
            let triggers = driver
                .adaptive_triggers()
                .ok_or_else(|| OutputError::unsupported("adaptive_triggers"))?;
            Ok(triggers.set_trigger_effect(sink, side, effect)?)
        })
    }

    /// Move a device to `seat`. A device already sitting there takes the
    /// moved device's old seat.
    pub fn set_seat(&self, handle: DeviceHandle, seat: Seat) -> Result<(), OutputError> {
        self.with_driver(handle, |_, _| Ok(()))?;

        let (old, displaced) = {
            let mut seats = self.seats.lock();
            let old = seats
                .iter()
                .position(|s| *s == Some(handle))
                .and_then(Seat::from_index);
            let displaced = seats
                .get(seat.index())
                .copied()
                .flatten()
                .filter(|other| *other != handle);
            if let Some(slot) = old.and_then(|o| seats.get_mut(o.index())) {
                *slot = displaced;
            }
            if let Some(slot) = seats.get_mut(seat.index()) {
                *slot = Some(handle);
            }
            (old, displaced)
        };

        info!("Device {} moved from seat {:?} to {:?}", handle, old, seat);
        self.update_seat(handle, Some(seat))?;
        if let Some(other) = displaced {
            if let Err(e) = self.update_seat(other, old) {
                warn!("Device {} could not take seat {:?}: {}", other, old, e);
            }
        }
        Ok(())
    }

    fn update_seat(&self, handle: DeviceHandle, seat: Option<Seat>) -> Result<(), OutputError> {
        let record = self
            .record(handle)
            .ok_or(OutputError::UnknownDevice { handle })?;
        let mut rec = record.lock();
        rec.seat = seat;
        match seat {
            Some(seat) => Ok(self.apply_seat(&mut rec, seat)?),
            None => Ok(()),
        }
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    /// Copy of the last committed snapshot.
    pub fn controller(&self, handle: DeviceHandle) -> Option<Controller> {
        self.record(handle).map(|r| r.lock().controller.clone())
    }

    pub fn capabilities(&self, handle: DeviceHandle) -> Option<Capabilities> {
        self.record(handle).map(|r| r.lock().info().capabilities)
    }

    pub fn device_info(&self, handle: DeviceHandle) -> Option<DeviceInfo> {
        self.record(handle).map(|r| r.lock().info())
    }

    pub fn state(&self, handle: DeviceHandle) -> Option<LifecycleState> {
        self.record(handle).map(|r| r.lock().state)
    }

    /// All records, ordered by handle.
    pub fn devices(&self) -> Vec<DeviceInfo> {
        let records: Vec<_> = self.devices.read().values().cloned().collect();
        let mut infos: Vec<DeviceInfo> = records.iter().map(|r| r.lock().info()).collect();
        infos.sort_by_key(|i| i.handle);
        infos
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn mark_ready(&self, rec: &mut DeviceRecord) -> Result<DeviceInfo, LifecycleError> {
        let handle = rec.handle;
        let seat = self
            .claim_seat(handle)
            .ok_or(LifecycleError::NoFreeSeat { handle })?;
        rec.seat = Some(seat);
        rec.state = LifecycleState::Ready;
        if let Err(e) = self.apply_seat(rec, seat) {
            warn!("Device {} seat indicator for {:?} failed: {}", handle, seat, e);
        }
        info!(
            "Device {} ({}) ready in seat {:?}",
            handle,
            rec.identity.display_name(),
            seat
        );
        Ok(rec.info())
    }

    /// Player LEDs and lightbar, whichever the device has.
    fn apply_seat(&self, rec: &mut DeviceRecord, seat: Seat) -> Result<(), TransportError> {
        let handle = rec.handle;
        let Some(driver) = rec.driver.as_mut() else {
            return Ok(());
        };
        let mut sink = OutputSink::new(self.transport.as_ref(), handle);
        if let Some(leds) = driver.player_leds() {
            leds.set_player_leds(&mut sink, seat.player_led_mask())?;
        }
        if let Some(lightbar) = driver.lightbar() {
            lightbar.set_lightbar_color(&mut sink, seat.color())?;
        }
        Ok(())
    }

    fn claim_seat(&self, handle: DeviceHandle) -> Option<Seat> {
        let mut seats = self.seats.lock();
        if let Some(index) = seats.iter().position(|s| *s == Some(handle)) {
            return Seat::from_index(index);
        }
        let index = seats.iter().position(Option::is_none)?;
        let slot = seats.get_mut(index)?;
        *slot = Some(handle);
        Seat::from_index(index)
    }

    fn release_seat(&self, seat: Seat, handle: DeviceHandle) {
        let mut seats = self.seats.lock();
        if let Some(slot) = seats.get_mut(seat.index()) {
            if *slot == Some(handle) {
                *slot = None;
            }
        }
    }

    /// Consult the application; a rejection parks the record in
    /// `Disconnected` until the transport drops the link.
    fn admit(&self, record: &Arc<Mutex<DeviceRecord>>, info: DeviceInfo) -> Result<(), LifecycleError> {
        match self.app.on_device_ready(&info) {
            Ok(()) => Ok(()),
            Err(reason) => {
                warn!("Device {} ({}) rejected: {}", info.handle, info.name, reason);
                let mut rec = record.lock();
                rec.state = LifecycleState::Disconnected;
                if let Some(seat) = rec.seat.take() {
                    self.release_seat(seat, info.handle);
                }
                Err(LifecycleError::Rejected(reason))
            }
        }
    }

    fn run_followup(
        &self,
        record: &Arc<Mutex<DeviceRecord>>,
        handle: DeviceHandle,
        followup: Followup,
    ) -> Result<(), LifecycleError> {
        if let Some(info) = followup.ready {
            self.admit(record, info)?;
        }
        if followup.system_button {
            let event = OobEvent::SystemButton { handle };
            debug!("Device {} system button", handle);
            self.app.on_oob_event(event);
        }
        if let Some((info, controller)) = followup.data {
            self.app.on_controller_data(&info, &controller);
        }
        Ok(())
    }
}
