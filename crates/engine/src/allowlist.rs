//! Address allowlist
//!
//! When enabled, discovery only accepts devices whose Bluetooth address is
//! listed. Disabled by default, in which case every address is allowed.

use std::sync::atomic::{AtomicBool, Ordering};

use padbridge_errors::{CapacityExceeded, ConfigError};
use padbridge_hid_common::BdAddr;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::properties::{PropertyStore, PropertyValue, keys};

pub const DEFAULT_CAPACITY: usize = 4;

#[derive(Debug)]
pub struct Allowlist {
    enabled: AtomicBool,
    addresses: RwLock<Vec<BdAddr>>,
    capacity: usize,
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            addresses: RwLock::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add `addr`. Adding a listed address is a no-op.
    pub fn add(&self, addr: BdAddr) -> Result<(), CapacityExceeded> {
        let mut addresses = self.addresses.write();
        if addresses.contains(&addr) {
            return Ok(());
        }
        if addresses.len() >= self.capacity {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }
        addresses.push(addr);
        info!("Allowlist added {}", addr);
        Ok(())
    }

    /// Remove `addr`; returns whether it was listed.
    pub fn remove(&self, addr: &BdAddr) -> bool {
        let mut addresses = self.addresses.write();
        let before = addresses.len();
        addresses.retain(|a| a != addr);
        let removed = addresses.len() != before;
        if removed {
            info!("Allowlist removed {}", addr);
        }
        removed
    }

    pub fn contains(&self, addr: &BdAddr) -> bool {
        self.addresses.read().contains(addr)
    }

    pub fn addresses(&self) -> Vec<BdAddr> {
        self.addresses.read().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        info!("Allowlist {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Discovery filter: always true while disabled.
    pub fn is_allowed(&self, addr: &BdAddr) -> bool {
        !self.is_enabled() || self.contains(addr)
    }

    /// Load from `bp.bt.allowlist` / `bp.bt.allow_en`. Absent keys leave an
    /// empty, disabled list. Unparsable or surplus entries are skipped with a
    /// warning.
    pub fn load(store: &dyn PropertyStore, capacity: usize) -> Result<Self, ConfigError> {
        let list = Self::with_capacity(capacity);
        if let Some(value) = store.get_property(keys::ALLOWLIST) {
            let text = value
                .as_str()
                .ok_or_else(|| ConfigError::invalid(keys::ALLOWLIST, "expected a string"))?;
            for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                match entry.parse::<BdAddr>() {
                    Ok(addr) => {
                        if let Err(e) = list.add(addr) {
                            warn!("Allowlist entry {} skipped: {}", entry, e);
                        }
                    }
                    Err(e) => warn!("Allowlist entry skipped: {}", e),
                }
            }
        }
        if let Some(value) = store.get_property(keys::ALLOWLIST_ENABLED) {
            let enabled = value
                .as_bool()
                .ok_or_else(|| ConfigError::invalid(keys::ALLOWLIST_ENABLED, "expected a byte"))?;
            list.enabled.store(enabled, Ordering::Release);
        }
        Ok(list)
    }

    pub fn save(&self, store: &dyn PropertyStore) -> Result<(), ConfigError> {
        let text = self
            .addresses
            .read()
            .iter()
            .map(BdAddr::to_string)
            .collect::<Vec<_>>()
            .join(",");
        store.set_property(keys::ALLOWLIST, PropertyValue::string(keys::ALLOWLIST, text)?)?;
        store.set_property(
            keys::ALLOWLIST_ENABLED,
            PropertyValue::Byte(u8::from(self.is_enabled())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::MemoryPropertyStore;

    fn addr(last: u8) -> BdAddr {
        BdAddr::new([0x00, 0x1A, 0x7D, 0xDA, 0x71, last])
    }

    #[test]
    fn test_add_remove_and_disable() -> Result<(), Box<dyn std::error::Error>> {
        let list = Allowlist::new();
        assert!(list.is_allowed(&addr(1)));

        list.add(addr(1))?;
        list.set_enabled(true);
        assert!(list.is_allowed(&addr(1)));
        assert!(!list.is_allowed(&addr(2)));

        assert!(list.remove(&addr(1)));
        assert!(!list.remove(&addr(1)));
        assert!(!list.is_allowed(&addr(1)));

        list.set_enabled(false);
        assert!(list.is_allowed(&addr(2)));
        Ok(())
    }

    #[test]
    fn test_capacity() -> Result<(), Box<dyn std::error::Error>> {
        let list = Allowlist::new();
        for i in 0..4 {
            list.add(addr(i))?;
        }
        list.add(addr(0))?;
        assert_eq!(list.add(addr(9)), Err(CapacityExceeded { capacity: 4 }));
        assert_eq!(list.addresses().len(), 4);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let store = MemoryPropertyStore::new();
        let list = Allowlist::new();
        list.add(addr(1))?;
        list.add(addr(2))?;
        list.set_enabled(true);
        list.save(&store)?;

        assert_eq!(
            store.get_property(keys::ALLOWLIST),
            Some(PropertyValue::Str("00:1A:7D:DA:71:01,00:1A:7D:DA:71:02".into()))
        );
        let loaded = Allowlist::load(&store, DEFAULT_CAPACITY)?;
        assert!(loaded.is_enabled());
        assert_eq!(loaded.addresses(), vec![addr(1), addr(2)]);
        Ok(())
    }

    #[test]
    fn test_load_skips_bad_entries() -> Result<(), Box<dyn std::error::Error>> {
        let store = MemoryPropertyStore::new();
        store.set_property(
            keys::ALLOWLIST,
            PropertyValue::Str("00:1A:7D:DA:71:01, nonsense ,".into()),
        )?;
        let loaded = Allowlist::load(&store, DEFAULT_CAPACITY)?;
        assert_eq!(loaded.addresses(), vec![addr(1)]);
        assert!(!loaded.is_enabled());
        Ok(())
    }
}
