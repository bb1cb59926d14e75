//! Bounds-checked report access
//!
//! Decoders read fixed offsets out of reports that arrive over a lossy radio
//! link, so every access goes through [`ReportReader`], which turns a short
//! report into a [`DecodeError::Truncated`] instead of a panic.

use padbridge_errors::DecodeError;

/// Borrowed, bounds-checked view of one raw report.
#[derive(Debug, Clone, Copy)]
pub struct ReportReader<'a> {
    data: &'a [u8],
    family: &'static str,
}

impl<'a> ReportReader<'a> {
    pub fn new(family: &'static str, data: &'a [u8]) -> Self {
        Self { data, family }
    }

    /// Fail unless the report carries at least `len` bytes.
    pub fn require(self, len: usize) -> Result<Self, DecodeError> {
        if self.data.len() < len {
            return Err(DecodeError::truncated(self.family, len, self.data.len()));
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Report id (first byte).
    pub fn report_id(&self) -> Result<u8, DecodeError> {
        self.u8_at(0)
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8, DecodeError> {
        self.data
            .get(offset)
            .copied()
            .ok_or_else(|| self.short(offset.saturating_add(1)))
    }

    pub fn i8_at(&self, offset: usize) -> Result<i8, DecodeError> {
        Ok(i8::from_le_bytes([self.u8_at(offset)?]))
    }

    pub fn u16_le_at(&self, offset: usize) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.bytes_at(offset)?))
    }

    pub fn i16_le_at(&self, offset: usize) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.bytes_at(offset)?))
    }

    pub fn u16_be_at(&self, offset: usize) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.bytes_at(offset)?))
    }

    /// Copy `N` bytes starting at `offset`.
    pub fn bytes_at<const N: usize>(&self, offset: usize) -> Result<[u8; N], DecodeError> {
        let end = offset.saturating_add(N);
        let slice = self.data.get(offset..end).ok_or_else(|| self.short(end))?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Everything from `offset` on; empty when `offset` is past the end.
    pub fn tail(&self, offset: usize) -> &'a [u8] {
        self.data.get(offset..).unwrap_or(&[])
    }

    /// Sub-reader over `len` bytes starting at `offset`.
    pub fn sub(&self, offset: usize, len: usize) -> Result<ReportReader<'a>, DecodeError> {
        let end = offset.saturating_add(len);
        let data = self.data.get(offset..end).ok_or_else(|| self.short(end))?;
        Ok(ReportReader {
            data,
            family: self.family,
        })
    }

    fn short(&self, expected: usize) -> DecodeError {
        DecodeError::truncated(self.family, expected, self.data.len())
    }
}

/// Copy `bytes` into `buf` at `offset`. Returns `false` and leaves `buf`
/// untouched when the write would not fit.
pub fn write_at(buf: &mut [u8], offset: usize, bytes: &[u8]) -> bool {
    let end = offset.saturating_add(bytes.len());
    match buf.get_mut(offset..end) {
        Some(slot) => {
            slot.copy_from_slice(bytes);
            true
        }
        None => false,
    }
}
