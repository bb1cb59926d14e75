//! Switch output report encoding.
//!
//! Every output report carries a 4-bit packet counter and 8 bytes of HD
//! rumble data, 4 per actuator. Subcommand reports (`0x01`) append the
//! subcommand id and its arguments; rumble-only reports (`0x10`) stop there.
//!
//! Amplitudes are encoded at a fixed 160 Hz high band / 320 Hz low band
//! pair, which is what the stock firmware plays for "neutral" rumble.

#![deny(static_mut_refs)]

use crate::ids::{report_ids, subcommands};

pub const RUMBLE_REPORT_LEN: usize = 10;
pub const SUBCOMMAND_REPORT_LEN: usize = 49;
const MAX_SUBCOMMAND_ARGS: usize = SUBCOMMAND_REPORT_LEN - 11;

/// Rumble data for one actuator at rest.
pub const NEUTRAL_RUMBLE: [u8; 4] = [0x00, 0x01, 0x40, 0x40];

/// Encode a 0..=255 magnitude as one actuator's 4 rumble bytes.
pub fn encode_rumble_amplitude(magnitude: u8) -> [u8; 4] {
    if magnitude == 0 {
        return NEUTRAL_RUMBLE;
    }
    // 0..=100 amplitude steps
    let step = u8::try_from(u16::from(magnitude) * 100 / 255).unwrap_or(100);
    [
        0x00,
        step.wrapping_mul(2).wrapping_add(1),
        0x40 | if step & 1 != 0 { 0x80 } else { 0x00 },
        0x40 + step / 2,
    ]
}

/// Rumble-only report. The left actuator plays `strong`, the right `weak`.
pub fn build_rumble_report(counter: u8, weak: u8, strong: u8) -> [u8; RUMBLE_REPORT_LEN] {
    let mut out = [0u8; RUMBLE_REPORT_LEN];
    out[0] = report_ids::RUMBLE_OUTPUT;
    out[1] = counter & 0x0F;
    out[2..6].copy_from_slice(&encode_rumble_amplitude(strong));
    out[6..10].copy_from_slice(&encode_rumble_amplitude(weak));
    out
}

/// Subcommand report with neutral rumble. Arguments beyond the report
/// capacity are dropped.
pub fn build_subcommand_report(counter: u8, subcommand: u8, args: &[u8]) -> [u8; SUBCOMMAND_REPORT_LEN] {
    let mut out = [0u8; SUBCOMMAND_REPORT_LEN];
    out[0] = report_ids::SUBCOMMAND_OUTPUT;
    out[1] = counter & 0x0F;
    out[2..6].copy_from_slice(&NEUTRAL_RUMBLE);
    out[6..10].copy_from_slice(&NEUTRAL_RUMBLE);
    out[10] = subcommand;
    let n = args.len().min(MAX_SUBCOMMAND_ARGS);
    out[11..11 + n].copy_from_slice(&args[..n]);
    out
}

/// Player lights from a 4-bit mask, LED 1 in bit 0.
pub fn build_player_lights_report(counter: u8, mask: u8) -> [u8; SUBCOMMAND_REPORT_LEN] {
    build_subcommand_report(counter, subcommands::SET_PLAYER_LIGHTS, &[mask & 0x0F])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_encoding() {
        assert_eq!(encode_rumble_amplitude(0), NEUTRAL_RUMBLE);
        assert_eq!(encode_rumble_amplitude(255), [0x00, 0xC9, 0x40, 0x72]);
        // step 49 is odd
        assert_eq!(encode_rumble_amplitude(125), [0x00, 0x63, 0xC0, 0x58]);
    }

    #[test]
    fn test_subcommand_layout() {
        let out = build_subcommand_report(0x13, subcommands::SET_INPUT_MODE, &[0x30]);
        assert_eq!(out[0], 0x01);
        assert_eq!(out[1], 0x03);
        assert_eq!(&out[2..10], &[0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40]);
        assert_eq!(out[10], 0x03);
        assert_eq!(out[11], 0x30);
        assert!(out[12..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_oversized_args_truncated() {
        let out = build_subcommand_report(0, 0x10, &[0xAA; 64]);
        assert_eq!(out.len(), SUBCOMMAND_REPORT_LEN);
        assert!(out[11..].iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn test_player_lights_mask() {
        let out = build_player_lights_report(1, 0xF3);
        assert_eq!(out[10], subcommands::SET_PLAYER_LIGHTS);
        assert_eq!(out[11], 0x03);
    }
}
