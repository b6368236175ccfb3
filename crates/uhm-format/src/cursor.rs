//! Bounds-checked little-endian reads over a byte slice.
//!
//! [`ByteCursor`] is the only code in the crate that touches raw document
//! bytes. A failed read leaves the position untouched.

use crate::error::{DecodeError, DecodeResult};

/// Sequential reader over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consume the next byte if it equals `expected`.
    ///
    /// Returns `false` (and does not advance) on mismatch or at end of data.
    pub fn expect(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn take<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let end = self.pos.checked_add(N).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed: N - self.remaining(),
            });
        };
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(out)
    }

    pub fn take_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn take_u16(&mut self) -> DecodeResult<u16> {
        self.take().map(u16::from_le_bytes)
    }

    pub fn take_u32(&mut self) -> DecodeResult<u32> {
        self.take().map(u32::from_le_bytes)
    }

    pub fn take_u64(&mut self) -> DecodeResult<u64> {
        self.take().map(u64::from_le_bytes)
    }

    pub fn take_f32(&mut self) -> DecodeResult<f32> {
        self.take().map(f32::from_le_bytes)
    }

    pub fn take_f64(&mut self) -> DecodeResult<f64> {
        self.take().map(f64::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let bytes = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.take_u8().unwrap(), 0x01);
        assert_eq!(cursor.take_u16().unwrap(), 0x1234);
        assert_eq!(cursor.take_u32().unwrap(), 0x1234_5678);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_float_reads() {
        let mut bytes = 0.25f32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(-3.5f64).to_le_bytes());
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.take_f32().unwrap(), 0.25);
        assert_eq!(cursor.take_f64().unwrap(), -3.5);
    }

    #[test]
    fn test_u64_uses_all_eight_bytes() {
        let bytes = 0x0102_0304_0506_0708u64.to_le_bytes();
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.take_u64().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_short_read_does_not_advance() {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut cursor = ByteCursor::new(&bytes);
        cursor.take_u8().unwrap();

        let err = cursor.take_u32().unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEnd { offset: 1, needed: 2 });
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.take_u16().unwrap(), 0xCCBB);
    }

    #[test]
    fn test_expect() {
        let bytes = *b"UH";
        let mut cursor = ByteCursor::new(&bytes);
        assert!(!cursor.expect(b'X'));
        assert_eq!(cursor.position(), 0);
        assert!(cursor.expect(b'U'));
        assert!(cursor.expect(b'H'));
        assert!(!cursor.expect(b'M'));
        assert_eq!(cursor.remaining(), 0);
    }
}
