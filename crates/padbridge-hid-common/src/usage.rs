//! HID usage page and usage ids consumed by the descriptor-driven drivers.

/// Usage pages.
pub mod page {
    pub const GENERIC_DESKTOP: u16 = 0x01;
    pub const SIMULATION: u16 = 0x02;
    pub const KEYBOARD: u16 = 0x07;
    pub const LED: u16 = 0x08;
    pub const BUTTON: u16 = 0x09;
    pub const CONSUMER: u16 = 0x0C;
    pub const DIGITIZER: u16 = 0x0D;
}

/// Generic Desktop page (0x01).
pub mod desktop {
    pub const POINTER: u16 = 0x01;
    pub const MOUSE: u16 = 0x02;
    pub const JOYSTICK: u16 = 0x04;
    pub const GAMEPAD: u16 = 0x05;
    pub const KEYBOARD: u16 = 0x06;
    pub const X: u16 = 0x30;
    pub const Y: u16 = 0x31;
    pub const Z: u16 = 0x32;
    pub const RX: u16 = 0x33;
    pub const RY: u16 = 0x34;
    pub const RZ: u16 = 0x35;
    pub const SLIDER: u16 = 0x36;
    pub const DIAL: u16 = 0x37;
    pub const WHEEL: u16 = 0x38;
    pub const HAT_SWITCH: u16 = 0x39;
    pub const SYSTEM_MAIN_MENU: u16 = 0x85;
    pub const DPAD_UP: u16 = 0x90;
    pub const DPAD_DOWN: u16 = 0x91;
    pub const DPAD_RIGHT: u16 = 0x92;
    pub const DPAD_LEFT: u16 = 0x93;
}

/// Simulation Controls page (0x02).
pub mod simulation {
    pub const ACCELERATOR: u16 = 0xC4;
    pub const BRAKE: u16 = 0xC5;
}

/// Consumer page (0x0C).
pub mod consumer {
    pub const MENU: u16 = 0x40;
    pub const AC_SEARCH: u16 = 0x221;
    pub const AC_HOME: u16 = 0x223;
    pub const AC_BACK: u16 = 0x224;
    pub const AC_PAN: u16 = 0x238;
}

/// Digitizer page (0x0D).
pub mod digitizer {
    pub const TIP_SWITCH: u16 = 0x42;
    pub const IN_RANGE: u16 = 0x32;
    pub const CONTACT_ID: u16 = 0x51;
}

/// Keyboard/Keypad page (0x07).
pub mod key {
    pub const NO_EVENT: u16 = 0x00;
    pub const ERROR_ROLL_OVER: u16 = 0x01;
    pub const POST_FAIL: u16 = 0x02;
    pub const ERROR_UNDEFINED: u16 = 0x03;
    pub const A: u8 = 0x04;
    pub const C: u8 = 0x06;
    pub const D: u8 = 0x07;
    pub const E: u8 = 0x08;
    pub const Q: u8 = 0x14;
    pub const R: u8 = 0x15;
    pub const S: u8 = 0x16;
    pub const W: u8 = 0x1A;
    pub const X: u8 = 0x1B;
    pub const Z: u8 = 0x1D;
    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const SPACE: u8 = 0x2C;
    pub const RIGHT_ARROW: u8 = 0x4F;
    pub const LEFT_ARROW: u8 = 0x50;
    pub const DOWN_ARROW: u8 = 0x51;
    pub const UP_ARROW: u8 = 0x52;
    pub const LEFT_CONTROL: u16 = 0xE0;
    pub const RIGHT_GUI: u16 = 0xE7;
}
