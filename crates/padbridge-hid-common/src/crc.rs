//! Bluetooth HID report checksums.

/// HIDP DATA|OUTPUT header byte. Sony pads seed the output CRC with it.
pub const HIDP_OUTPUT_SEED: u8 = 0xA2;

/// HIDP DATA|INPUT header byte, used to verify input reports.
pub const HIDP_INPUT_SEED: u8 = 0xA1;

/// CRC-32 over the HIDP header byte followed by `data`.
pub fn bt_crc32(seed: u8, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[seed]);
    hasher.update(data);
    hasher.finalize()
}
