//! Sony vendor and product identifiers.

#![deny(static_mut_refs)]

/// Sony Interactive Entertainment vendor id.
pub const SONY_VENDOR_ID: u16 = 0x054C;

pub mod product_ids {
    /// DualShock 4, first revision (CUH-ZCT1).
    pub const DS4_V1: u16 = 0x05C4;
    /// DualShock 4, second revision (CUH-ZCT2).
    pub const DS4_V2: u16 = 0x09CC;
    /// DualShock 4 USB wireless adaptor.
    pub const DS4_DONGLE: u16 = 0x0BA0;
    pub const DUALSENSE: u16 = 0x0CE6;
    pub const DUALSENSE_EDGE: u16 = 0x0DF2;
}

pub mod report_ids {
    /// Reduced report sent before the pad is switched to full reports.
    pub const SIMPLE_INPUT: u8 = 0x01;
    pub const DS4_BT_INPUT: u8 = 0x11;
    pub const DUALSENSE_BT_INPUT: u8 = 0x31;
    pub const DS4_BT_OUTPUT: u8 = 0x11;
    pub const DUALSENSE_BT_OUTPUT: u8 = 0x31;
    /// Reading this feature report switches both pads to full BT reports.
    pub const CALIBRATION_FEATURE: u8 = 0x05;
}
