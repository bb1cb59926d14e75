//! Canonical output requests.

use serde::{Deserialize, Serialize};

/// Dual-motor rumble. Magnitudes are 0..=255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RumbleRequest {
    pub start_delay_ms: u16,
    pub duration_ms: u16,
    pub weak_magnitude: u8,
    pub strong_magnitude: u8,
}

impl RumbleRequest {
    pub fn new(start_delay_ms: u16, duration_ms: u16, weak: u8, strong: u8) -> Self {
        Self {
            start_delay_ms,
            duration_ms,
            weak_magnitude: weak,
            strong_magnitude: strong,
        }
    }

    pub fn is_off(&self) -> bool {
        self.weak_magnitude == 0 && self.strong_magnitude == 0
    }

    /// When the effect should stop, counted from now.
    pub fn stop_at_ms(&self) -> u32 {
        u32::from(self.start_delay_ms) + u32::from(self.duration_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSide {
    Left,
    Right,
}

/// Adaptive trigger effect.
///
/// Positions are trigger travel zones `0..=9`, strengths `1..=8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TriggerEffect {
    #[default]
    Off,
    /// Constant resistance from `position` to the end of travel.
    Feedback { position: u8, strength: u8 },
    /// Resistance between `start` and `end` that snaps once passed.
    Weapon { start: u8, end: u8, strength: u8 },
    /// Vibration from `position` on.
    Vibration {
        position: u8,
        amplitude: u8,
        frequency: u8,
    },
}
