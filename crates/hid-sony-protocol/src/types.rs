//! Sony controller model classification.

#![deny(static_mut_refs)]

use crate::ids::product_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SonyModel {
    DualShock4,
    DualSense,
    DualSenseEdge,
    Unknown,
}

impl SonyModel {
    pub fn from_product_id(product_id: u16) -> Self {
        match product_id {
            product_ids::DS4_V1 | product_ids::DS4_V2 | product_ids::DS4_DONGLE => {
                Self::DualShock4
            }
            product_ids::DUALSENSE => Self::DualSense,
            product_ids::DUALSENSE_EDGE => Self::DualSenseEdge,
            _ => Self::Unknown,
        }
    }

    pub fn is_dualsense(self) -> bool {
        matches!(self, Self::DualSense | Self::DualSenseEdge)
    }

    pub fn has_adaptive_triggers(self) -> bool {
        self.is_dualsense()
    }

    /// DualShock 4 has only the lightbar to show the seat.
    pub fn has_player_leds(self) -> bool {
        self.is_dualsense()
    }
}
