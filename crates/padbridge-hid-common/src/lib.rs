//! Common HID utilities for padbridge controller protocol implementations
//!
//! This crate provides the pieces shared by every vendor protocol crate and
//! the engine: bounds-checked report reading, the Bluetooth HID output CRC,
//! HID usage constants, resolved report layouts with usage extraction, device
//! identity types and the transport seam.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod crc;
pub mod identity;
pub mod layout;
pub mod mock;
pub mod report;
pub mod transport;
pub mod usage;

pub use crc::bt_crc32;
pub use identity::{BdAddr, ClassOfDevice, DeviceIdentity, ParseBdAddrError};
pub use layout::{HidField, HidGlobals, ReportLayout, extract_bits, sign_extend};
pub use report::{ReportReader, write_at};
pub use transport::{DeviceHandle, Transport};
