//! Keyboard arm of the canonical state.

use padbridge_errors::CapacityExceeded;
use serde::{Deserialize, Serialize};

/// Maximum simultaneously tracked key presses.
pub const MAX_PRESSED_KEYS: usize = 10;

pub const MOD_LEFT_CONTROL: u8 = 0x01;
pub const MOD_LEFT_SHIFT: u8 = 0x02;
pub const MOD_LEFT_ALT: u8 = 0x04;
pub const MOD_LEFT_GUI: u8 = 0x08;
pub const MOD_RIGHT_CONTROL: u8 = 0x10;
pub const MOD_RIGHT_SHIFT: u8 = 0x20;
pub const MOD_RIGHT_ALT: u8 = 0x40;
pub const MOD_RIGHT_GUI: u8 = 0x80;

/// Insertion-ordered set of pressed HID keyboard usages with a fixed
/// capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PressedKeys {
    keys: [u8; MAX_PRESSED_KEYS],
    len: u8,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key`. Already-present keys are accepted without change; a full
    /// set refuses new keys.
    pub fn push(&mut self, key: u8) -> Result<(), CapacityExceeded> {
        if self.contains(key) {
            return Ok(());
        }
        let slot = self
            .keys
            .get_mut(usize::from(self.len))
            .ok_or(CapacityExceeded {
                capacity: MAX_PRESSED_KEYS,
            })?;
        *slot = key;
        self.len += 1;
        Ok(())
    }

    pub fn contains(&self, key: u8) -> bool {
        self.as_slice().contains(&key)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.keys.get(..usize::from(self.len)).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= MAX_PRESSED_KEYS
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Keyboard snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyboard {
    pub pressed_keys: PressedKeys,
    pub modifiers: u8,
}

impl Keyboard {
    pub fn key_pressed(&self, key: u8) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn modifier_pressed(&self, mask: u8) -> bool {
        self.modifiers & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_insertion_order() -> Result<(), CapacityExceeded> {
        let mut keys = PressedKeys::new();
        keys.push(0x1D)?;
        keys.push(0x04)?;
        keys.push(0x2C)?;
        assert_eq!(keys.as_slice(), &[0x1D, 0x04, 0x2C]);
        Ok(())
    }

    #[test]
    fn test_push_duplicate_is_noop() -> Result<(), CapacityExceeded> {
        let mut keys = PressedKeys::new();
        keys.push(0x04)?;
        keys.push(0x04)?;
        assert_eq!(keys.len(), 1);
        Ok(())
    }

    #[test]
    fn test_overflow_is_refused() -> Result<(), CapacityExceeded> {
        let mut keys = PressedKeys::new();
        for key in 0..MAX_PRESSED_KEYS as u8 {
            keys.push(0x04 + key)?;
        }
        assert!(keys.is_full());
        assert_eq!(
            keys.push(0x50),
            Err(CapacityExceeded {
                capacity: MAX_PRESSED_KEYS
            })
        );
        assert_eq!(keys.len(), MAX_PRESSED_KEYS);
        assert!(!keys.contains(0x50));
        // A key that is already held is still accepted when full.
        assert_eq!(keys.push(0x04), Ok(()));
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), CapacityExceeded> {
        let mut keys = PressedKeys::new();
        keys.push(0x04)?;
        keys.clear();
        assert!(keys.is_empty());
        assert_eq!(keys.iter().count(), 0);
        Ok(())
    }
}
