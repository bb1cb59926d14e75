//! Wii Remote identifiers, report ids and register addresses.

#![deny(static_mut_refs)]

pub const NINTENDO_VENDOR_ID: u16 = 0x057E;

pub mod product_ids {
    /// Original remote; the Balance Board reports the same id.
    pub const WII_REMOTE: u16 = 0x0306;
    /// Remote with built-in MotionPlus.
    pub const WII_REMOTE_PLUS: u16 = 0x0330;
}

/// Bluetooth names, used when the SDP ids are not available.
pub mod names {
    pub const REMOTE: &str = "Nintendo RVL-CNT-01";
    pub const REMOTE_PLUS: &str = "Nintendo RVL-CNT-01-TR";
    pub const BALANCE_BOARD: &str = "Nintendo RVL-WBC-01";
}

pub mod report_ids {
    // Output
    pub const RUMBLE: u8 = 0x10;
    pub const LEDS: u8 = 0x11;
    pub const DATA_REPORTING_MODE: u8 = 0x12;
    pub const STATUS_REQUEST: u8 = 0x15;
    pub const WRITE_MEMORY: u8 = 0x16;
    pub const READ_MEMORY: u8 = 0x17;

    // Input
    pub const STATUS: u8 = 0x20;
    pub const READ_MEMORY_DATA: u8 = 0x21;
    pub const ACK: u8 = 0x22;

    /// Core buttons only.
    pub const MODE_BUTTONS: u8 = 0x30;
    /// Buttons and accelerometer.
    pub const MODE_BUTTONS_ACCEL: u8 = 0x31;
    /// Buttons and 8 extension bytes.
    pub const MODE_BUTTONS_EXT8: u8 = 0x32;
    /// Buttons, accelerometer and 12 IR bytes.
    pub const MODE_BUTTONS_ACCEL_IR12: u8 = 0x33;
    /// Buttons and 19 extension bytes.
    pub const MODE_BUTTONS_EXT19: u8 = 0x34;
    /// Buttons, accelerometer and 16 extension bytes.
    pub const MODE_BUTTONS_ACCEL_EXT16: u8 = 0x35;
    /// Buttons, 10 IR bytes and 9 extension bytes.
    pub const MODE_BUTTONS_IR10_EXT9: u8 = 0x36;
    /// Buttons, accelerometer, 10 IR bytes and 6 extension bytes.
    pub const MODE_BUTTONS_ACCEL_IR10_EXT6: u8 = 0x37;
    /// 21 extension bytes, no buttons.
    pub const MODE_EXT21: u8 = 0x3D;
}

/// Extension register space, unencrypted access.
pub mod registers {
    /// Control register space selector for read/write requests.
    pub const SPACE_CONTROL: u8 = 0x04;
    pub const EXTENSION_INIT_1: u32 = 0xA4_00F0;
    pub const EXTENSION_INIT_1_VALUE: u8 = 0x55;
    pub const EXTENSION_INIT_2: u32 = 0xA4_00FB;
    pub const EXTENSION_INIT_2_VALUE: u8 = 0x00;
    pub const EXTENSION_ID: u32 = 0xA4_00FA;
    pub const EXTENSION_ID_LEN: u16 = 6;
}
