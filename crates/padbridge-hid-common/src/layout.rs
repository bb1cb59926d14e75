//! Resolved HID report layouts
//!
//! Descriptor parsing belongs to the host stack. What arrives here is the
//! already-resolved result: a flat list of input fields, each with its report
//! id, usage page, usage range, bit position and the global items in force
//! when it was declared. [`ReportLayout::for_each_usage`] walks one raw report
//! against that list and yields `(globals, page, usage, value)` tuples, which is
//! the stream the descriptor-driven drivers consume.

use padbridge_errors::DecodeError;
use serde::{Deserialize, Serialize};

/// Global items in force for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidGlobals {
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    /// Bits per element.
    pub report_size: u8,
    /// Number of elements.
    pub report_count: u8,
}

impl HidGlobals {
    pub fn new(logical_min: i32, logical_max: i32, report_size: u8, report_count: u8) -> Self {
        Self {
            logical_min,
            logical_max,
            physical_min: logical_min,
            physical_max: logical_max,
            report_size,
            report_count,
        }
    }

    /// Whether values are two's complement.
    pub fn is_signed(&self) -> bool {
        self.logical_min < 0
    }

    /// Rescale `value` from the logical range onto `[out_min, out_max]`.
    ///
    /// Values outside the logical range are clamped first. A degenerate
    /// logical range maps everything to `out_min`.
    pub fn scale(&self, value: i32, out_min: i32, out_max: i32) -> i32 {
        let lmin = i64::from(self.logical_min.min(self.logical_max));
        let lmax = i64::from(self.logical_max.max(self.logical_min));
        let span = lmax - lmin;
        if span == 0 {
            return out_min;
        }
        let v = i64::from(value).clamp(lmin, lmax);
        let out_span = i64::from(out_max) - i64::from(out_min);
        let scaled = i64::from(out_min) + (v - lmin) * out_span / span;
        i32::try_from(scaled).unwrap_or(out_min)
    }
}

/// One input main item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidField {
    /// Report id, 0 when the device does not use report ids.
    pub report_id: u8,
    pub usage_page: u16,
    pub usage_min: u16,
    pub usage_max: u16,
    /// Bit offset of the first element, counted after the report id byte.
    pub bit_offset: u16,
    /// Array field: elements carry usage indices rather than values.
    pub is_array: bool,
    pub globals: HidGlobals,
}

impl HidField {
    /// Variable field with one usage per element starting at `usage_min`.
    pub fn variable(
        report_id: u8,
        usage_page: u16,
        usage_min: u16,
        bit_offset: u16,
        globals: HidGlobals,
    ) -> Self {
        let count = u16::from(globals.report_count.max(1));
        Self {
            report_id,
            usage_page,
            usage_min,
            usage_max: usage_min.saturating_add(count - 1),
            bit_offset,
            is_array: false,
            globals,
        }
    }

    /// Array field selecting usages from `usage_min..=usage_max`.
    pub fn array(
        report_id: u8,
        usage_page: u16,
        usage_min: u16,
        usage_max: u16,
        bit_offset: u16,
        globals: HidGlobals,
    ) -> Self {
        Self {
            report_id,
            usage_page,
            usage_min,
            usage_max,
            bit_offset,
            is_array: true,
            globals,
        }
    }

    /// Bit just past the last element.
    pub fn bit_end(&self) -> usize {
        usize::from(self.bit_offset)
            + usize::from(self.globals.report_size) * usize::from(self.globals.report_count)
    }
}

/// All input fields of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub fields: Vec<HidField>,
}

impl ReportLayout {
    pub fn new(fields: Vec<HidField>) -> Self {
        Self { fields }
    }

    /// Whether the reports are prefixed by a report id byte.
    pub fn uses_report_ids(&self) -> bool {
        self.fields.iter().any(|f| f.report_id != 0)
    }

    /// Walk `report` and call `sink` once per usage it carries.
    ///
    /// Variable elements are reported with their (sign-extended when the
    /// logical minimum is negative) value. Array elements are reported as the
    /// selected usage with value 1; out-of-range selectors are skipped.
    pub fn for_each_usage<F>(&self, report: &[u8], mut sink: F) -> Result<usize, DecodeError>
    where
        F: FnMut(&HidGlobals, u16, u16, i32),
    {
        let (report_id, payload) = if self.uses_report_ids() {
            match report.split_first() {
                Some((id, rest)) => (*id, rest),
                None => return Err(DecodeError::truncated("hid", 1, 0)),
            }
        } else {
            (0, report)
        };

        let mut matched = 0usize;
        let mut emitted = 0usize;
        for field in self.fields.iter().filter(|f| f.report_id == report_id) {
            matched += 1;
            let need_bytes = field.bit_end().div_ceil(8);
            if payload.len() < need_bytes {
                let id_len = usize::from(report_id != 0);
                return Err(DecodeError::truncated(
                    "hid",
                    need_bytes + id_len,
                    report.len(),
                ));
            }
            emitted += emit_field(field, payload, &mut sink);
        }

        if matched == 0 {
            return Err(DecodeError::unknown_report("hid", report_id));
        }
        Ok(emitted)
    }
}

fn emit_field<F>(field: &HidField, payload: &[u8], sink: &mut F) -> usize
where
    F: FnMut(&HidGlobals, u16, u16, i32),
{
    let g = &field.globals;
    let size = g.report_size;
    let mut emitted = 0;
    for i in 0..usize::from(g.report_count) {
        let bit = usize::from(field.bit_offset) + i * usize::from(size);
        let Some(raw) = extract_bits(payload, bit, size) else {
            continue;
        };
        if field.is_array {
            let selector = if g.is_signed() {
                i64::from(sign_extend(raw, size))
            } else {
                i64::from(raw)
            };
            let index = selector - i64::from(g.logical_min);
            if selector < i64::from(g.logical_min) || selector > i64::from(g.logical_max) {
                continue;
            }
            let usage = i64::from(field.usage_min) + index;
            if usage > i64::from(field.usage_max) {
                continue;
            }
            if let Ok(usage) = u16::try_from(usage) {
                sink(g, field.usage_page, usage, 1);
                emitted += 1;
            }
        } else {
            let offset = u16::try_from(i).unwrap_or(u16::MAX);
            let usage = field.usage_min.saturating_add(offset).min(field.usage_max);
            let value = if g.is_signed() {
                sign_extend(raw, size)
            } else {
                i32::try_from(raw).unwrap_or(i32::MAX)
            };
            sink(g, field.usage_page, usage, value);
            emitted += 1;
        }
    }
    emitted
}

/// Read `bit_len` bits (1..=32) starting at `bit_offset`, HID bit order
/// (least significant bit of the lowest byte first).
pub fn extract_bits(data: &[u8], bit_offset: usize, bit_len: u8) -> Option<u32> {
    if bit_len == 0 || bit_len > 32 {
        return None;
    }
    let end = bit_offset.checked_add(usize::from(bit_len))?;
    if end > data.len().checked_mul(8)? {
        return None;
    }
    let mut value = 0u32;
    for i in 0..usize::from(bit_len) {
        let bit = bit_offset + i;
        let byte = *data.get(bit / 8)?;
        if (byte >> (bit % 8)) & 1 != 0 {
            value |= 1 << i;
        }
    }
    Some(value)
}

/// Two's complement sign extension of a `bits`-wide value.
pub fn sign_extend(value: u32, bits: u8) -> i32 {
    if bits == 0 || bits >= 32 {
        return i32::from_ne_bytes(value.to_ne_bytes());
    }
    let shift = 32 - u32::from(bits);
    i32::from_ne_bytes((value << shift).to_ne_bytes()) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{desktop, page};

    fn gamepad_layout() -> ReportLayout {
        ReportLayout::new(vec![
            // 16 buttons, 1 bit each
            HidField::variable(1, page::BUTTON, 1, 0, HidGlobals::new(0, 1, 1, 16)),
            // X, Y as signed bytes
            HidField::variable(1, page::GENERIC_DESKTOP, desktop::X, 16, HidGlobals::new(-127, 127, 8, 2)),
            // hat, 4 bits, 0..7
            HidField::variable(1, page::GENERIC_DESKTOP, desktop::HAT_SWITCH, 32, HidGlobals::new(0, 7, 4, 1)),
        ])
    }

    #[test]
    fn test_extract_bits_lsb_first() {
        let data = [0b1010_0101u8, 0b0000_0011];
        assert_eq!(extract_bits(&data, 0, 4), Some(0b0101));
        assert_eq!(extract_bits(&data, 4, 4), Some(0b1010));
        assert_eq!(extract_bits(&data, 6, 4), Some(0b1110));
        assert_eq!(extract_bits(&data, 14, 4), None);
        assert_eq!(extract_bits(&data, 0, 0), None);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0xFFFF_FFFF, 32), -1);
    }

    #[test]
    fn test_scale() {
        let g = HidGlobals::new(0, 255, 8, 1);
        assert_eq!(g.scale(0, -512, 511), -512);
        assert_eq!(g.scale(255, -512, 511), 511);
        assert_eq!(g.scale(1000, 0, 1023), 1023);
        let flat = HidGlobals::new(5, 5, 8, 1);
        assert_eq!(flat.scale(5, -512, 511), -512);
    }

    #[test]
    fn test_for_each_usage_variable_fields() -> Result<(), Box<dyn std::error::Error>> {
        let layout = gamepad_layout();
        // id, buttons 1 and 10 pressed, X = -2, Y = 3, hat = 6
        let report = [0x01, 0b0000_0001, 0b0000_0010, 0xFE, 0x03, 0x06];
        let mut seen = Vec::new();
        let n = layout.for_each_usage(&report, |_, p, u, v| seen.push((p, u, v)))?;
        assert_eq!(n, 19);
        assert!(seen.contains(&(page::BUTTON, 1, 1)));
        assert!(seen.contains(&(page::BUTTON, 10, 1)));
        assert!(seen.contains(&(page::BUTTON, 2, 0)));
        assert!(seen.contains(&(page::GENERIC_DESKTOP, desktop::X, -2)));
        assert!(seen.contains(&(page::GENERIC_DESKTOP, desktop::Y, 3)));
        assert!(seen.contains(&(page::GENERIC_DESKTOP, desktop::HAT_SWITCH, 6)));
        Ok(())
    }

    #[test]
    fn test_for_each_usage_array_field() -> Result<(), Box<dyn std::error::Error>> {
        let layout = ReportLayout::new(vec![HidField::array(
            0,
            page::KEYBOARD,
            0,
            0xFF,
            0,
            HidGlobals::new(0, 0xFF, 8, 3),
        )]);
        let mut seen = Vec::new();
        layout.for_each_usage(&[0x04, 0x00, 0x2C], |_, _, u, v| seen.push((u, v)))?;
        assert_eq!(seen, vec![(0x04, 1), (0x00, 1), (0x2C, 1)]);
        Ok(())
    }

    #[test]
    fn test_for_each_usage_rejects_short_and_unknown() {
        let layout = gamepad_layout();
        assert!(matches!(
            layout.for_each_usage(&[0x01, 0x00], |_, _, _, _| {}),
            Err(DecodeError::Truncated { expected: 3, .. })
        ));
        assert!(matches!(
            layout.for_each_usage(&[0x07, 0, 0, 0, 0, 0], |_, _, _, _| {}),
            Err(DecodeError::UnknownReport { report_id: 0x07, .. })
        ));
        assert!(layout.for_each_usage(&[], |_, _, _, _| {}).is_err());
    }

    #[test]
    fn test_layout_serde() -> Result<(), Box<dyn std::error::Error>> {
        let layout = gamepad_layout();
        let json = serde_json::to_string(&layout)?;
        let back: ReportLayout = serde_json::from_str(&json)?;
        assert_eq!(back, layout);
        Ok(())
    }
}
