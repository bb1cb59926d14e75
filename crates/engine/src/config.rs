//! Engine configuration

use padbridge_errors::ConfigError;
use serde::{Deserialize, Serialize};

use crate::allowlist;
use crate::properties::{PropertyStore, keys, optional_u32};

/// Seats are A through D.
pub const MAX_SEATS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Simultaneously bound devices.
    pub max_devices: usize,
    /// Accept devices whose Class of Device says keyboard.
    pub accept_keyboards: bool,
    /// Accept pointing devices.
    pub accept_mice: bool,
    pub allowlist_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_devices: MAX_SEATS,
            accept_keyboards: true,
            accept_mice: true,
            allowlist_capacity: allowlist::DEFAULT_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by whatever the store holds.
    pub fn from_properties(store: &dyn PropertyStore) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(max) = optional_u32(store, keys::MAX_DEVICES)? {
            config.max_devices = usize::try_from(max)
                .map_err(|_| ConfigError::invalid(keys::MAX_DEVICES, "out of range"))?;
        }
        if let Some(v) = optional_u32(store, keys::ACCEPT_KEYBOARDS)? {
            config.accept_keyboards = v != 0;
        }
        if let Some(v) = optional_u32(store, keys::ACCEPT_MICE)? {
            config.accept_mice = v != 0;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_devices == 0 || self.max_devices > MAX_SEATS {
            return Err(ConfigError::invalid(
                "max_devices",
                format!("must be 1..={MAX_SEATS}, got {}", self.max_devices),
            ));
        }
        if self.allowlist_capacity == 0 {
            return Err(ConfigError::invalid("allowlist_capacity", "must be non-zero"));
        }
        Ok(())
    }
}
