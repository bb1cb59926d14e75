//! Wii Remote output reports.
//!
//! Bit 0 of the first payload byte of every output report drives the rumble
//! motor, so the current rumble level is threaded through each builder.

#![deny(static_mut_refs)]

use crate::ids::{registers, report_ids};

/// Longest output report: a 16-byte register write.
pub const MAX_OUTPUT_LEN: usize = 22;

/// Variable-length output report in a fixed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiiOutput {
    buf: [u8; MAX_OUTPUT_LEN],
    len: usize,
}

impl WiiOutput {
    fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; MAX_OUTPUT_LEN];
        let len = bytes.len().min(MAX_OUTPUT_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        Self { buf, len }
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.get(..self.len).unwrap_or(&[])
    }

    pub fn report_id(&self) -> u8 {
        self.buf[0]
    }
}

fn rumble_bit(rumble: bool) -> u8 {
    u8::from(rumble)
}

pub fn build_rumble_report(on: bool) -> WiiOutput {
    WiiOutput::from_slice(&[report_ids::RUMBLE, rumble_bit(on)])
}

/// Player LEDs from a 4-bit mask, LED 1 in bit 0.
pub fn build_leds_report(mask: u8, rumble: bool) -> WiiOutput {
    WiiOutput::from_slice(&[report_ids::LEDS, ((mask & 0x0F) << 4) | rumble_bit(rumble)])
}

pub fn build_status_request(rumble: bool) -> WiiOutput {
    WiiOutput::from_slice(&[report_ids::STATUS_REQUEST, rumble_bit(rumble)])
}

/// Non-continuous reporting in `mode`.
pub fn build_reporting_mode(mode: u8, rumble: bool) -> WiiOutput {
    WiiOutput::from_slice(&[report_ids::DATA_REPORTING_MODE, rumble_bit(rumble), mode])
}

fn address_bytes(address: u32) -> [u8; 3] {
    let [_, a2, a1, a0] = address.to_be_bytes();
    [a2, a1, a0]
}

/// Write up to 16 bytes into the control register space.
pub fn build_write_register(address: u32, data: &[u8], rumble: bool) -> WiiOutput {
    let [a2, a1, a0] = address_bytes(address);
    let len = data.len().min(16);
    let mut out = [0u8; MAX_OUTPUT_LEN];
    out[0] = report_ids::WRITE_MEMORY;
    out[1] = registers::SPACE_CONTROL | rumble_bit(rumble);
    out[2] = a2;
    out[3] = a1;
    out[4] = a0;
    out[5] = u8::try_from(len).unwrap_or(16);
    out[6..6 + len].copy_from_slice(&data[..len]);
    WiiOutput {
        buf: out,
        len: MAX_OUTPUT_LEN,
    }
}

pub fn build_read_register(address: u32, size: u16, rumble: bool) -> WiiOutput {
    let [a2, a1, a0] = address_bytes(address);
    let [s1, s0] = size.to_be_bytes();
    WiiOutput::from_slice(&[
        report_ids::READ_MEMORY,
        registers::SPACE_CONTROL | rumble_bit(rumble),
        a2,
        a1,
        a0,
        s1,
        s0,
    ])
}
