//! Balance Board as a joystick.
//!
//! Leaning drives the four directions through exponentially smoothed
//! left/right and top/bottom load sums. Jumping fires: the board must see a
//! press (total weight over the fire threshold), then every sensor released
//! (airborne), held for two samples, before fire is asserted for a fixed
//! number of samples. Timing is counted in samples only.

use padbridge_model::BalanceBoard;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Joystick;

/// Weight of the newest sample in the smoothed sums.
pub const SMOOTHING_FACTOR: f64 = 0.06;
/// Samples allowed between the press and take-off.
pub const THRESHOLD_TIMEOUT_SAMPLES: u16 = 10;
/// Consecutive airborne samples required to fire.
pub const IN_AIR_SAMPLES: u16 = 2;
/// Samples during which fire stays asserted.
pub const FIRE_HOLD_SAMPLES: u16 = 10;

/// Board-specific tuning. There are no built-in defaults; the values come
/// from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBoardThresholds {
    /// Smoothed side-to-side difference that asserts a direction.
    pub move_threshold: u32,
    /// Total weight that arms jump detection.
    pub fire_threshold: u32,
    /// Per-sensor reading under which the board counts as unloaded.
    pub idle_threshold: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireState {
    #[default]
    Reset,
    Threshold,
    InAir,
    Fire,
}

/// Per-board state carried between samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceBoardState {
    pub smoothed_left: f64,
    pub smoothed_right: f64,
    pub smoothed_top: f64,
    pub smoothed_bottom: f64,
    pub counter: u16,
    pub fire_state: FireState,
}

fn smooth(acc: &mut f64, raw: i32) {
    *acc += (f64::from(raw) - *acc) * SMOOTHING_FACTOR;
}

impl BalanceBoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample and return the joystick it produces.
    pub fn update(&mut self, bb: &BalanceBoard, thresholds: &BalanceBoardThresholds) -> Joystick {
        smooth(&mut self.smoothed_left, bb.left());
        smooth(&mut self.smoothed_right, bb.right());
        smooth(&mut self.smoothed_top, bb.top());
        smooth(&mut self.smoothed_bottom, bb.bottom());

        let threshold = f64::from(thresholds.move_threshold);
        let mut js = Joystick {
            left: self.smoothed_left - self.smoothed_right > threshold,
            right: self.smoothed_right - self.smoothed_left > threshold,
            up: self.smoothed_top - self.smoothed_bottom > threshold,
            down: self.smoothed_bottom - self.smoothed_top > threshold,
            ..Joystick::default()
        };
        js.fire = self.step_fire(bb, thresholds);
        js
    }

    fn set_state(&mut self, next: FireState) {
        if next != self.fire_state {
            trace!(from = ?self.fire_state, to = ?next, "balance board fire state");
        }
        self.fire_state = next;
        self.counter = 0;
    }

    fn step_fire(&mut self, bb: &BalanceBoard, thresholds: &BalanceBoardThresholds) -> bool {
        let idle = thresholds.idle_threshold;
        let all_idle = bb.tl < idle && bb.tr < idle && bb.bl < idle && bb.br < idle;

        match self.fire_state {
            FireState::Reset => {
                if bb.total() > thresholds.fire_threshold {
                    self.set_state(FireState::Threshold);
                }
            }
            FireState::Threshold => {
                if all_idle {
                    self.set_state(FireState::InAir);
                } else {
                    self.counter = self.counter.saturating_add(1);
                    if self.counter >= THRESHOLD_TIMEOUT_SAMPLES {
                        self.set_state(FireState::Reset);
                    }
                }
            }
            FireState::InAir => {
                if all_idle {
                    self.counter = self.counter.saturating_add(1);
                    if self.counter >= IN_AIR_SAMPLES {
                        self.set_state(FireState::Fire);
                    }
                } else {
                    self.set_state(FireState::Reset);
                }
            }
            FireState::Fire => {}
        }

        if self.fire_state != FireState::Fire {
            return false;
        }
        self.counter = self.counter.saturating_add(1);
        if self.counter >= FIRE_HOLD_SAMPLES {
            self.set_state(FireState::Reset);
        }
        true
    }
}
