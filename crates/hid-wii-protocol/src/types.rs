//! Extension classification.

#![deny(static_mut_refs)]

use crate::ids::report_ids;

pub const NUNCHUK_ID: [u8; 6] = [0x00, 0x00, 0xA4, 0x20, 0x00, 0x00];
pub const BALANCE_BOARD_ID: [u8; 6] = [0x00, 0x00, 0xA4, 0x20, 0x04, 0x02];

/// What is plugged into (or built into) the remote's extension port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WiiExtension {
    #[default]
    None,
    Nunchuk,
    BalanceBoard,
    /// Present but not decoded (Classic Controller, MotionPlus, ...).
    Unsupported([u8; 6]),
}

impl WiiExtension {
    pub fn from_id(id: [u8; 6]) -> Self {
        match id {
            NUNCHUK_ID => Self::Nunchuk,
            BALANCE_BOARD_ID => Self::BalanceBoard,
            other => Self::Unsupported(other),
        }
    }

    /// Data reporting mode carrying everything this extension needs.
    pub fn data_mode(self) -> u8 {
        match self {
            Self::Nunchuk => report_ids::MODE_BUTTONS_ACCEL_EXT16,
            Self::BalanceBoard => report_ids::MODE_BUTTONS_EXT19,
            Self::None | Self::Unsupported(_) => report_ids::MODE_BUTTONS_ACCEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_ids() {
        assert_eq!(WiiExtension::from_id(NUNCHUK_ID), WiiExtension::Nunchuk);
        assert_eq!(WiiExtension::from_id(BALANCE_BOARD_ID), WiiExtension::BalanceBoard);
        let classic = [0x00, 0x00, 0xA4, 0x20, 0x01, 0x01];
        assert_eq!(WiiExtension::from_id(classic), WiiExtension::Unsupported(classic));
        assert_eq!(WiiExtension::Unsupported(classic).data_mode(), 0x31);
        assert_eq!(WiiExtension::Nunchuk.data_mode(), 0x35);
        assert_eq!(WiiExtension::BalanceBoard.data_mode(), 0x34);
    }
}
