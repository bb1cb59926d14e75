//! Mouse arm of the canonical state.

use serde::{Deserialize, Serialize};

pub const BUTTON_LEFT: u16 = 1 << 0;
pub const BUTTON_RIGHT: u16 = 1 << 1;
pub const BUTTON_MIDDLE: u16 = 1 << 2;
pub const BUTTON_BACK: u16 = 1 << 3;
pub const BUTTON_FORWARD: u16 = 1 << 4;

/// Relative motion since the previous report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mouse {
    pub delta_x: i32,
    pub delta_y: i32,
    pub buttons: u16,
    pub scroll_wheel: i8,
    pub misc_buttons: u8,
}
