//! padbridge engine - controller drivers and device lifecycle
//!
//! This crate binds Bluetooth/BLE HID controllers to per-family drivers,
//! decodes their input into the canonical [`padbridge_model::Controller`]
//! record and encodes output requests (rumble, player LEDs, lightbar,
//! adaptive triggers) back into vendor reports.
//!
//! The transport, the property store and the application are traits; the
//! engine never touches a radio.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

pub mod allowlist;
pub mod binding;
pub mod config;
pub mod driver;
pub mod logging;
pub mod manager;
pub mod properties;

pub use allowlist::Allowlist;
pub use binding::{BINDING_RULES, BindingRule, Matcher, RuleKind, resolve_family, resolve_rule};
pub use config::EngineConfig;
pub use driver::{
    AdaptiveTriggers, Capabilities, ControllerDriver, DriverFamily, Lightbar, OutputSink,
    PlayerLeds, Rumble, SetupStatus, create_driver, dispatch_usages,
};
pub use manager::{
    Application, Delivery, DeviceInfo, DeviceManager, DiscoveryDecision, LifecycleState,
    NullApplication, OobEvent, RejectReason,
};
pub use properties::{MemoryPropertyStore, PropertyStore, PropertyValue};
