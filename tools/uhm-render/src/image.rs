//! PNG reading and writing for 8-bit RGBA buffers.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use uhm_format::Canvas;

/// Error type for image I/O.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Read(String),

    #[error("Failed to write image: {0}")]
    Write(String),

    #[error("Pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An 8-bit, 4-channel image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The four channel bytes at (x, y).
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

impl From<&Canvas> for RgbaImage {
    /// Pixel bytes go out in wire order, unchanged.
    fn from(canvas: &Canvas) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
            data: canvas.to_bytes(),
        }
    }
}

/// Load a PNG image as RGBA pixels.
pub fn load_png(path: impl AsRef<Path>) -> Result<RgbaImage, ImageError> {
    let file = File::open(path)?;
    let decoder = png::Decoder::new(file);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Read(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Read(e.to_string()))?;
    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Read(format!("Unsupported bit depth: {:?}", info.bit_depth)));
    }

    let raw = &buf[..info.buffer_size()];
    let data = match info.color_type {
        png::ColorType::Rgba => raw.to_vec(),
        png::ColorType::Rgb => raw
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => raw.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => raw
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => return Err(ImageError::Read(format!("Unsupported color type: {other:?}"))),
    };

    RgbaImage::new(info.width, info.height, data)
}

/// Save RGBA pixels as PNG.
pub fn save_png(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| ImageError::Write(e.to_string()))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| ImageError::Write(e.to_string()))?;

    Ok(())
}
