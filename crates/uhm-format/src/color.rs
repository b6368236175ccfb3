//! Packed 32-bit colors.
//!
//! A color is four opaque channel bytes in wire order. The packed word is the
//! little-endian reading of those bytes, so `byte0` occupies the low eight
//! bits. Channel meaning (red, blue, alpha, ...) is left to the producer and
//! consumer of the document; the decoder only copies and interpolates
//! channels by position.

use std::fmt;

/// A color in wire channel order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0);

    /// Build a color from its packed word.
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    /// Build a color from its four wire bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// The packed word.
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// The four wire bytes, in order.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Channel `index` in wire order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 4 or more.
    pub fn channel(self, index: usize) -> u8 {
        self.to_bytes()[index]
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(0x{:08X})", self.0)
    }
}
