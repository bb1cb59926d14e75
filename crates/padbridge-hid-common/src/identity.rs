//! Device identity types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::ReportLayout;

/// Bluetooth device address, most significant byte first as printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BdAddr(pub [u8; 6]);

impl BdAddr {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Bluetooth address: {0:?}")]
pub struct ParseBdAddrError(pub String);

impl FromStr for BdAddr {
    type Err = ParseBdAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut out = [0u8; 6];
        let mut parts = trimmed.split([':', '-']);
        for slot in out.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2)
                .ok_or_else(|| ParseBdAddrError(trimmed.to_string()))?;
            *slot = u8::from_str_radix(part, 16)
                .map_err(|_| ParseBdAddrError(trimmed.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseBdAddrError(trimmed.to_string()));
        }
        Ok(Self(out))
    }
}

impl Serialize for BdAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BdAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Bluetooth Class of Device bits as reported during inquiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassOfDevice(pub u32);

impl ClassOfDevice {
    const MAJOR_PERIPHERAL: u32 = 0x05;
    const MINOR_KEYBOARD: u32 = 0x40;
    const MINOR_POINTING: u32 = 0x80;
    const MINOR_JOYSTICK: u32 = 0x04;
    const MINOR_GAMEPAD: u32 = 0x08;
    const MINOR_SUBTYPE_MASK: u32 = 0x3C;

    pub fn major(&self) -> u32 {
        (self.0 >> 8) & 0x1F
    }

    pub fn is_peripheral(&self) -> bool {
        self.major() == Self::MAJOR_PERIPHERAL
    }

    pub fn is_keyboard(&self) -> bool {
        self.is_peripheral() && self.0 & Self::MINOR_KEYBOARD != 0
    }

    pub fn is_pointing(&self) -> bool {
        self.is_peripheral() && self.0 & Self::MINOR_POINTING != 0
    }

    pub fn is_gamepad(&self) -> bool {
        let sub = self.0 & Self::MINOR_SUBTYPE_MASK;
        self.is_peripheral() && (sub == Self::MINOR_GAMEPAD || sub == Self::MINOR_JOYSTICK)
    }

    /// Keyboard bit set without any gamepad/joystick subtype.
    pub fn is_bare_keyboard(&self) -> bool {
        self.is_keyboard() && !self.is_gamepad() && !self.is_pointing()
    }
}

/// Everything the transport knows about a connected device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub address: BdAddr,
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: String,
    pub class_of_device: ClassOfDevice,
    /// Resolved input report layout, when the host parsed a descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ReportLayout>,
}

impl DeviceIdentity {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: BdAddr) -> Self {
        self.address = address;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_class_of_device(mut self, cod: u32) -> Self {
        self.class_of_device = ClassOfDevice(cod);
        self
    }

    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
        } else {
            self.name.clone()
        }
    }
}
