//! Command implementations for padctl

pub mod bind;
pub mod decode;
pub mod replay;

use clap::Args;
use padbridge_hid_common::DeviceIdentity;

use crate::hex::{parse_cod, parse_id};

/// Identity as the transport would report it. Ids are hex.
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// Vendor id, hex (e.g. 054C)
    #[arg(long, value_parser = parse_id, default_value = "0")]
    pub vid: u16,

    /// Product id, hex
    #[arg(long, value_parser = parse_id, default_value = "0")]
    pub pid: u16,

    /// Advertised device name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Class of Device, hex (e.g. 002508)
    #[arg(long, value_parser = parse_cod, default_value = "0")]
    pub cod: u32,
}

impl IdentityArgs {
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.vid, self.pid)
            .with_name(self.name.clone())
            .with_class_of_device(self.cod)
    }
}
