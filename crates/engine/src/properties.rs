//! Persistent key/value properties
//!
//! The platform owns storage; the engine reads and writes through
//! [`PropertyStore`]. Keys are short dotted names (`bp.bt.allowlist`).

use std::collections::HashMap;

use padbridge_errors::ConfigError;
use padbridge_joystick::BalanceBoardThresholds;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Longest string value a property can hold, in bytes.
pub const MAX_STR_LEN: usize = 96;

pub mod keys {
    pub const ALLOWLIST: &str = "bp.bt.allowlist";
    pub const ALLOWLIST_ENABLED: &str = "bp.bt.allow_en";
    pub const BB_MOVE_THRESHOLD: &str = "bp.bb.move_thres";
    pub const BB_FIRE_THRESHOLD: &str = "bp.bb.fire_thres";
    pub const BB_IDLE_THRESHOLD: &str = "bp.bb.idle_thres";
    pub const MAX_DEVICES: &str = "bp.max_devices";
    pub const ACCEPT_KEYBOARDS: &str = "bp.accept_kb";
    pub const ACCEPT_MICE: &str = "bp.accept_mouse";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Byte(u8),
    U32(u32),
    Float(f32),
    Str(String),
}

impl PropertyValue {
    /// String value, rejected when longer than [`MAX_STR_LEN`].
    pub fn string(key: &str, value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.len() > MAX_STR_LEN {
            return Err(ConfigError::invalid(
                key,
                format!("string of {} bytes exceeds {MAX_STR_LEN}", value.len()),
            ));
        }
        Ok(PropertyValue::Str(value))
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            PropertyValue::Byte(v) => Some(u32::from(*v)),
            PropertyValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_u32().map(|v| v != 0)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Byte(_) => "byte",
            PropertyValue::U32(_) => "u32",
            PropertyValue::Float(_) => "float",
            PropertyValue::Str(_) => "string",
        }
    }
}

/// Platform key/value storage.
pub trait PropertyStore: Send + Sync {
    fn get_property(&self, key: &str) -> Option<PropertyValue>;
    fn set_property(&self, key: &str, value: PropertyValue) -> Result<(), ConfigError>;
}

/// Volatile store for hosts without persistence and for tests.
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    values: RwLock<HashMap<String, PropertyValue>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.values.read().get(key).cloned()
    }

    fn set_property(&self, key: &str, value: PropertyValue) -> Result<(), ConfigError> {
        if let PropertyValue::Str(s) = &value {
            if s.len() > MAX_STR_LEN {
                return Err(ConfigError::invalid(key, "string value too long"));
            }
        }
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}

/// Required unsigned property.
pub fn require_u32(store: &dyn PropertyStore, key: &str) -> Result<u32, ConfigError> {
    let value = store
        .get_property(key)
        .ok_or_else(|| ConfigError::MissingProperty(key.to_string()))?;
    value
        .as_u32()
        .ok_or_else(|| ConfigError::invalid(key, format!("expected an integer, found {}", value.type_name())))
}

/// Optional unsigned property; present but mistyped is still an error.
pub fn optional_u32(store: &dyn PropertyStore, key: &str) -> Result<Option<u32>, ConfigError> {
    match store.get_property(key) {
        None => Ok(None),
        Some(value) => value.as_u32().map(Some).ok_or_else(|| {
            ConfigError::invalid(key, format!("expected an integer, found {}", value.type_name()))
        }),
    }
}

/// Balance-board tuning. All three properties must be set.
pub fn balance_board_thresholds(
    store: &dyn PropertyStore,
) -> Result<BalanceBoardThresholds, ConfigError> {
    let move_threshold = require_u32(store, keys::BB_MOVE_THRESHOLD)?;
    let fire_threshold = require_u32(store, keys::BB_FIRE_THRESHOLD)?;
    let idle = require_u32(store, keys::BB_IDLE_THRESHOLD)?;
    let idle_threshold = u16::try_from(idle)
        .map_err(|_| ConfigError::invalid(keys::BB_IDLE_THRESHOLD, format!("{idle} exceeds a sensor reading")))?;
    Ok(BalanceBoardThresholds {
        move_threshold,
        fire_threshold,
        idle_threshold,
    })
}
