//! Factory stick calibration.
//!
//! SPI flash at `0x603D` holds 18 bytes: 9 for the left stick, 9 for the
//! right. Each 9-byte block is three packed 12-bit (x, y) pairs. The left
//! block is ordered max-above-center, center, min-below-center; the right
//! block is center, min-below-center, max-above-center.

#![deny(static_mut_refs)]

use padbridge_model::gamepad::{AXIS_MAX, AXIS_MIN};

/// Calibration for one stick, in raw 12-bit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickCalibration {
    pub x_center: u16,
    pub y_center: u16,
    /// Travel below center.
    pub x_below: u16,
    pub y_below: u16,
    /// Travel above center.
    pub x_above: u16,
    pub y_above: u16,
}

impl Default for StickCalibration {
    /// Nominal values for pads whose flash is blank.
    fn default() -> Self {
        Self {
            x_center: 2048,
            y_center: 2048,
            x_below: 1536,
            y_below: 1536,
            x_above: 1536,
            y_above: 1536,
        }
    }
}

impl StickCalibration {
    /// Normalize a raw reading. `x` grows right, the returned `y` grows up.
    pub fn normalize(&self, raw_x: u16, raw_y: u16) -> (i32, i32) {
        (
            scale(raw_x, self.x_center, self.x_below, self.x_above),
            scale(raw_y, self.y_center, self.y_below, self.y_above),
        )
    }
}

fn scale(raw: u16, center: u16, below: u16, above: u16) -> i32 {
    let delta = i32::from(raw) - i32::from(center);
    let value = if delta >= 0 {
        delta * AXIS_MAX / i32::from(above.max(1))
    } else {
        delta * -AXIS_MIN / i32::from(below.max(1))
    };
    value.clamp(AXIS_MIN, AXIS_MAX)
}

/// Unpack one 3-byte (x, y) pair of 12-bit values.
pub fn unpack_pair(b: [u8; 3]) -> (u16, u16) {
    let [b0, b1, b2] = b;
    let x = u16::from(b0) | (u16::from(b1 & 0x0F) << 8);
    let y = u16::from(b1 >> 4) | (u16::from(b2) << 4);
    (x, y)
}

/// Parse the 18-byte factory calibration block into (left, right).
///
/// Blank flash (all `0xFF`) or a short block yields `None`.
pub fn parse_factory_stick_calibration(
    data: &[u8],
) -> Option<(StickCalibration, StickCalibration)> {
    let block: &[u8; 18] = data.get(..18)?.try_into().ok()?;
    if block.iter().all(|b| *b == 0xFF) {
        return None;
    }
    let pair = |i: usize| -> Option<(u16, u16)> {
        let bytes: [u8; 3] = block.get(i..i + 3)?.try_into().ok()?;
        Some(unpack_pair(bytes))
    };

    let (l_above_x, l_above_y) = pair(0)?;
    let (l_center_x, l_center_y) = pair(3)?;
    let (l_below_x, l_below_y) = pair(6)?;
    let (r_center_x, r_center_y) = pair(9)?;
    let (r_below_x, r_below_y) = pair(12)?;
    let (r_above_x, r_above_y) = pair(15)?;

    let left = StickCalibration {
        x_center: l_center_x,
        y_center: l_center_y,
        x_below: l_below_x,
        y_below: l_below_y,
        x_above: l_above_x,
        y_above: l_above_y,
    };
    let right = StickCalibration {
        x_center: r_center_x,
        y_center: r_center_y,
        x_below: r_below_x,
        y_below: r_below_y,
        x_above: r_above_x,
        y_above: r_above_y,
    };
    Some((left, right))
}
