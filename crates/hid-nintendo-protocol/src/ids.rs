//! Nintendo vendor, product, report and subcommand identifiers.

#![deny(static_mut_refs)]

pub const NINTENDO_VENDOR_ID: u16 = 0x057E;

pub mod product_ids {
    pub const JOYCON_L: u16 = 0x2006;
    pub const JOYCON_R: u16 = 0x2007;
    pub const PRO_CONTROLLER: u16 = 0x2009;
}

pub mod report_ids {
    /// Rumble data followed by a subcommand.
    pub const SUBCOMMAND_OUTPUT: u8 = 0x01;
    /// Rumble data only.
    pub const RUMBLE_OUTPUT: u8 = 0x10;
    /// Standard input plus a subcommand reply.
    pub const SUBCOMMAND_REPLY: u8 = 0x21;
    /// Standard full-mode input at 60/120 Hz.
    pub const FULL_INPUT: u8 = 0x30;
    /// Simple HID mode input, sent until full mode is selected.
    pub const SIMPLE_INPUT: u8 = 0x3F;
}

pub mod subcommands {
    pub const REQUEST_DEVICE_INFO: u8 = 0x02;
    pub const SET_INPUT_MODE: u8 = 0x03;
    pub const SPI_FLASH_READ: u8 = 0x10;
    pub const SET_PLAYER_LIGHTS: u8 = 0x30;
    pub const ENABLE_IMU: u8 = 0x40;
    pub const ENABLE_VIBRATION: u8 = 0x48;
}

pub mod spi {
    /// Factory stick calibration, left then right, 9 bytes each.
    pub const FACTORY_STICK_CALIBRATION: u32 = 0x603D;
    pub const FACTORY_STICK_CALIBRATION_LEN: u8 = 18;
}

/// Input mode selected by [`subcommands::SET_INPUT_MODE`].
pub const INPUT_MODE_FULL: u8 = 0x30;
