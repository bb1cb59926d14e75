//! Xbox controller model classification.

#![deny(static_mut_refs)]

use crate::ids::product_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XboxModel {
    OneS,
    EliteSeries2,
    SeriesXS,
    Unknown,
}

impl XboxModel {
    pub fn from_product_id(product_id: u16) -> Self {
        match product_id {
            product_ids::XBOX_ONE_S_V1 | product_ids::XBOX_ONE_S_V2 => Self::OneS,
            product_ids::ELITE_SERIES_2 | product_ids::ELITE_SERIES_2_BLE => Self::EliteSeries2,
            product_ids::SERIES_XS_BLE => Self::SeriesXS,
            _ => Self::Unknown,
        }
    }

    /// Only the Series X|S pad has a share button.
    pub fn has_share_button(self) -> bool {
        matches!(self, Self::SeriesXS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_product_id() {
        assert_eq!(XboxModel::from_product_id(0x02FD), XboxModel::OneS);
        assert_eq!(XboxModel::from_product_id(0x0B22), XboxModel::EliteSeries2);
        assert_eq!(XboxModel::from_product_id(0x0B13), XboxModel::SeriesXS);
        assert_eq!(XboxModel::from_product_id(0x028E), XboxModel::Unknown);
        assert!(XboxModel::SeriesXS.has_share_button());
    }
}
