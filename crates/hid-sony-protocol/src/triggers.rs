//! DualSense adaptive trigger effect encoding.
//!
//! Each trigger takes an 11-byte effect block inside the output report. The
//! first byte selects the mode; the rest encodes per-zone parameters over the
//! ten travel zones of the trigger.
//!
//! | Mode      | Byte 0 | Payload |
//! |-----------|--------|---------|
//! | Off       | `0x05` | none |
//! | Feedback  | `0x21` | active zone mask (u16 le), 3-bit force per zone (u32 le) |
//! | Weapon    | `0x25` | start/end zone mask (u16 le), strength - 1 |
//! | Vibration | `0x26` | active zone mask (u16 le), 3-bit amplitude per zone (u32 le), frequency at byte 9 |
//!
//! Out-of-range parameters are clamped into the accepted range; a zero
//! strength or amplitude encodes as Off.

#![deny(static_mut_refs)]

use padbridge_model::TriggerEffect;

pub const TRIGGER_EFFECT_LEN: usize = 11;

pub mod modes {
    pub const OFF: u8 = 0x05;
    pub const FEEDBACK: u8 = 0x21;
    pub const WEAPON: u8 = 0x25;
    pub const VIBRATION: u8 = 0x26;
}

const ZONES: u8 = 10;

/// Encode one trigger effect block.
pub fn encode_trigger_effect(effect: &TriggerEffect) -> [u8; TRIGGER_EFFECT_LEN] {
    match *effect {
        TriggerEffect::Off => off(),
        TriggerEffect::Feedback { position, strength } => feedback(position, strength),
        TriggerEffect::Weapon {
            start,
            end,
            strength,
        } => weapon(start, end, strength),
        TriggerEffect::Vibration {
            position,
            amplitude,
            frequency,
        } => vibration(position, amplitude, frequency),
    }
}

fn off() -> [u8; TRIGGER_EFFECT_LEN] {
    let mut out = [0u8; TRIGGER_EFFECT_LEN];
    out[0] = modes::OFF;
    out
}

/// Active-zone mask and packed 3-bit levels for zones `position..10`.
fn zones_from(position: u8, level: u8) -> (u16, u32) {
    let mut active = 0u16;
    let mut packed = 0u32;
    for zone in position.min(ZONES - 1)..ZONES {
        active |= 1 << zone;
        packed |= u32::from(level & 0x07) << (3 * u32::from(zone));
    }
    (active, packed)
}

fn feedback(position: u8, strength: u8) -> [u8; TRIGGER_EFFECT_LEN] {
    if strength == 0 {
        return off();
    }
    let (active, forces) = zones_from(position, strength.min(8) - 1);
    let mut out = [0u8; TRIGGER_EFFECT_LEN];
    out[0] = modes::FEEDBACK;
    out[1..3].copy_from_slice(&active.to_le_bytes());
    out[3..7].copy_from_slice(&forces.to_le_bytes());
    out
}

fn weapon(start: u8, end: u8, strength: u8) -> [u8; TRIGGER_EFFECT_LEN] {
    if strength == 0 {
        return off();
    }
    let start = start.clamp(2, 7);
    let end = end.clamp(start + 1, 8);
    let zones: u16 = (1 << start) | (1 << end);
    let mut out = [0u8; TRIGGER_EFFECT_LEN];
    out[0] = modes::WEAPON;
    out[1..3].copy_from_slice(&zones.to_le_bytes());
    out[3] = strength.min(8) - 1;
    out
}

fn vibration(position: u8, amplitude: u8, frequency: u8) -> [u8; TRIGGER_EFFECT_LEN] {
    if amplitude == 0 || frequency == 0 {
        return off();
    }
    let (active, amplitudes) = zones_from(position, amplitude.min(8) - 1);
    let mut out = [0u8; TRIGGER_EFFECT_LEN];
    out[0] = modes::VIBRATION;
    out[1..3].copy_from_slice(&active.to_le_bytes());
    out[3..7].copy_from_slice(&amplitudes.to_le_bytes());
    out[9] = frequency;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_off() {
        let out = encode_trigger_effect(&TriggerEffect::Off);
        assert_snapshot!(format!("{out:02X?}"), @"[05, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]");
    }

    #[test]
    fn test_feedback_full_travel_max_strength() {
        // zones 0..10 active, force 7 in each: 30 bits set
        let out = encode_trigger_effect(&TriggerEffect::Feedback {
            position: 0,
            strength: 8,
        });
        assert_snapshot!(format!("{out:02X?}"), @"[21, FF, 03, FF, FF, FF, 3F, 00, 00, 00, 00]");
    }

    #[test]
    fn test_feedback_from_zone_eight() {
        // zones 8 and 9, force 1: bits 24 and 27
        let out = encode_trigger_effect(&TriggerEffect::Feedback {
            position: 8,
            strength: 2,
        });
        assert_snapshot!(format!("{out:02X?}"), @"[21, 00, 03, 00, 00, 00, 09, 00, 00, 00, 00]");
    }

    #[test]
    fn test_weapon() {
        let out = encode_trigger_effect(&TriggerEffect::Weapon {
            start: 2,
            end: 5,
            strength: 8,
        });
        assert_snapshot!(format!("{out:02X?}"), @"[25, 24, 00, 07, 00, 00, 00, 00, 00, 00, 00]");
    }

    #[test]
    fn test_weapon_clamps_range() {
        let out = encode_trigger_effect(&TriggerEffect::Weapon {
            start: 0,
            end: 0,
            strength: 20,
        });
        // start clamps to 2, end to 3, strength to 8
        assert_eq!(out[0], modes::WEAPON);
        assert_eq!(u16::from_le_bytes([out[1], out[2]]), (1 << 2) | (1 << 3));
        assert_eq!(out[3], 7);
    }

    #[test]
    fn test_vibration() {
        let out = encode_trigger_effect(&TriggerEffect::Vibration {
            position: 9,
            amplitude: 8,
            frequency: 40,
        });
        // zone 9 only, amplitude 7 at bits 27..30
        assert_snapshot!(format!("{out:02X?}"), @"[26, 00, 02, 00, 00, 00, 38, 00, 00, 28, 00]");
    }

    #[test]
    fn test_zero_strength_is_off() {
        let off = encode_trigger_effect(&TriggerEffect::Off);
        assert_eq!(
            encode_trigger_effect(&TriggerEffect::Feedback {
                position: 3,
                strength: 0
            }),
            off
        );
        assert_eq!(
            encode_trigger_effect(&TriggerEffect::Vibration {
                position: 3,
                amplitude: 4,
                frequency: 0
            }),
            off
        );
    }
}
