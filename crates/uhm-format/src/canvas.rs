//! The raster target.

use crate::color::Color;

/// A width x height grid of packed colors, row-major.
///
/// Shapes overwrite pixels outright; there is no blending with what was
/// there before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas with every pixel set to `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let len = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![background; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Fill with a color.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// The packed pixel words.
    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Serialize every pixel as its four wire bytes, unchanged.
    ///
    /// This is the one place pixels leave the packed representation; callers
    /// that need another channel order should convert from here.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
