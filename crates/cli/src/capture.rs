//! JSON capture format replayed by `padctl replay`.
//!
//! ```json
//! {
//!   "config": { "max_devices": 2 },
//!   "properties": { "bp.bb.move_thres": { "type": "u32", "value": 200 } },
//!   "events": [
//!     { "type": "connected", "handle": 1,
//!       "identity": { "vendor_id": 1118, "product_id": 765 } },
//!     { "type": "ready", "handle": 1 },
//!     { "type": "input", "handle": 1, "report": "02 01" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use padbridge_engine::{EngineConfig, PropertyValue};
use padbridge_hid_common::{BdAddr, DeviceHandle, DeviceIdentity, ReportLayout};
use padbridge_model::RumbleRequest;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Capture {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    pub events: Vec<CaptureEvent>,
}

impl Capture {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        let capture: Capture = serde_json::from_str(json)?;
        if capture.events.is_empty() {
            return Err(CliError::InvalidCapture("no events".into()));
        }
        Ok(capture)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Transport-side view of a device, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapturedIdentity {
    pub address: BdAddr,
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: String,
    pub class_of_device: u32,
    pub layout: Option<ReportLayout>,
}

impl From<CapturedIdentity> for DeviceIdentity {
    fn from(c: CapturedIdentity) -> Self {
        let identity = DeviceIdentity::new(c.vendor_id, c.product_id)
            .with_address(c.address)
            .with_name(c.name)
            .with_class_of_device(c.class_of_device);
        match c.layout {
            Some(layout) => identity.with_layout(layout),
            None => identity,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureEvent {
    Discovered {
        address: BdAddr,
        #[serde(default)]
        name: String,
        #[serde(default)]
        class_of_device: u32,
        #[serde(default)]
        rssi: i8,
    },
    Connected {
        handle: DeviceHandle,
        #[serde(default)]
        identity: CapturedIdentity,
    },
    Ready {
        handle: DeviceHandle,
    },
    /// Input report as hex.
    Input {
        handle: DeviceHandle,
        report: String,
    },
    Feature {
        handle: DeviceHandle,
        report: String,
    },
    Rumble {
        handle: DeviceHandle,
        request: RumbleRequest,
    },
    RadioEnabled,
    RadioDisabled,
    Disconnected {
        handle: DeviceHandle,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capture() -> Result<(), Box<dyn std::error::Error>> {
        let capture = Capture::from_json(
            r#"{
                "config": { "max_devices": 2 },
                "properties": { "bp.bt.allow_en": { "type": "byte", "value": 0 } },
                "events": [
                    { "type": "discovered", "address": "00:1A:7D:DA:71:13",
                      "name": "Pro Controller", "class_of_device": 9480 },
                    { "type": "connected", "handle": 4,
                      "identity": { "address": "00:1A:7D:DA:71:13" } },
                    { "type": "input", "handle": 4, "report": "30 00" },
                    { "type": "rumble", "handle": 4, "request": {
                        "start_delay_ms": 0, "duration_ms": 200,
                        "weak_magnitude": 255, "strong_magnitude": 0 } },
                    { "type": "radio_disabled" }
                ]
            }"#,
        )?;
        assert_eq!(capture.config.max_devices, 2);
        assert_eq!(capture.properties.len(), 1);
        assert_eq!(capture.events.len(), 5);
        assert!(matches!(
            capture.events.get(1),
            Some(CaptureEvent::Connected { handle: 4, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_empty_capture_is_rejected() {
        assert!(matches!(
            Capture::from_json(r#"{ "events": [] }"#),
            Err(CliError::InvalidCapture(_))
        ));
        assert!(matches!(
            Capture::from_json(r#"{ "events": [ { "type": "teleport" } ] }"#),
            Err(CliError::JsonError(_))
        ));
    }
}
