//! Microsoft vendor and Xbox controller product identifiers.

#![deny(static_mut_refs)]

pub const MICROSOFT_VENDOR_ID: u16 = 0x045E;

pub mod product_ids {
    /// Xbox One S controller, Bluetooth firmware 3.x.
    pub const XBOX_ONE_S_V1: u16 = 0x02E0;
    /// Xbox One S controller, Bluetooth firmware 4.x and later.
    pub const XBOX_ONE_S_V2: u16 = 0x02FD;
    pub const ELITE_SERIES_2: u16 = 0x0B05;
    pub const SERIES_XS_BLE: u16 = 0x0B13;
    pub const ELITE_SERIES_2_BLE: u16 = 0x0B22;
}

pub mod report_ids {
    pub const GAMEPAD_INPUT: u8 = 0x01;
    /// Guide button, sent separately by older firmware.
    pub const GUIDE_INPUT: u8 = 0x02;
    pub const RUMBLE_OUTPUT: u8 = 0x03;
    pub const BATTERY_INPUT: u8 = 0x04;
}
