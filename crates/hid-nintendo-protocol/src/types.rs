//! Switch controller model classification.

#![deny(static_mut_refs)]

use crate::ids::product_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchModel {
    ProController,
    /// Left Joy-Con, used on its own held sideways.
    JoyConLeft,
    /// Right Joy-Con, used on its own held sideways.
    JoyConRight,
    Unknown,
}

impl SwitchModel {
    pub fn from_product_id(product_id: u16) -> Self {
        match product_id {
            product_ids::PRO_CONTROLLER => Self::ProController,
            product_ids::JOYCON_L => Self::JoyConLeft,
            product_ids::JOYCON_R => Self::JoyConRight,
            _ => Self::Unknown,
        }
    }

    pub fn is_joycon(self) -> bool {
        matches!(self, Self::JoyConLeft | Self::JoyConRight)
    }
}
