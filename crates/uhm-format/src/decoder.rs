//! Document decoding: header, top-level loop, limits.

use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::context::{DrawContext, ParseContext, PatternRegistry};
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::Point;
use crate::instruction::{parse_instruction, Instruction};

/// File header marker.
pub const MAGIC: [u8; 3] = *b"UHM";

/// Limits applied to a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum block nesting while parsing, and maximum placement recursion
    /// while drawing.
    pub max_nesting_depth: usize,
    /// Maximum `width * height` of the output canvas.
    pub max_canvas_pixels: u64,
    /// Maximum shape draws, tile cells and pattern placements per document.
    pub max_draw_operations: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
            max_canvas_pixels: 16384 * 16384,
            max_draw_operations: 1 << 24,
        }
    }
}

impl DecodeOptions {
    /// Tighter limits for untrusted input.
    pub fn strict() -> Self {
        Self {
            max_nesting_depth: 16,
            max_canvas_pixels: 4096 * 4096,
            max_draw_operations: 1 << 20,
        }
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_max_canvas_pixels(mut self, pixels: u64) -> Self {
        self.max_canvas_pixels = pixels;
        self
    }

    pub fn with_max_draw_operations(mut self, operations: u64) -> Self {
        self.max_draw_operations = operations;
        self
    }

    /// Reject canvas sizes over the pixel limit.
    pub fn check_canvas(&self, width: u32, height: u32) -> DecodeResult<()> {
        if width as u64 * height as u64 > self.max_canvas_pixels {
            return Err(DecodeError::CanvasTooLarge {
                width,
                height,
                limit: self.max_canvas_pixels,
            });
        }
        Ok(())
    }
}

/// Decode `bytes` onto a `width` x `height` canvas with default limits.
pub fn decode(bytes: &[u8], width: u32, height: u32) -> DecodeResult<Canvas> {
    decode_with_options(bytes, width, height, &DecodeOptions::default())
}

/// Decode `bytes` onto a `width` x `height` canvas.
///
/// Top-level instructions are drawn as soon as they are parsed, so a
/// placement only sees patterns defined earlier in the document. On error
/// the partially drawn canvas is dropped.
pub fn decode_with_options(
    bytes: &[u8],
    width: u32,
    height: u32,
    options: &DecodeOptions,
) -> DecodeResult<Canvas> {
    options.check_canvas(width, height)?;

    let mut cursor = ByteCursor::new(bytes);
    if !MAGIC.iter().all(|&b| cursor.expect(b)) {
        return Err(DecodeError::BadMagic);
    }
    let background = Color::from_packed(cursor.take_u32()?);

    debug!(
        width,
        height,
        len = bytes.len(),
        ?background,
        "Decoding document"
    );

    let mut canvas = Canvas::new(width, height, background);
    let mut patterns = PatternRegistry::new();
    let mut ctx = ParseContext::new(cursor, &mut patterns, options.max_nesting_depth);
    let mut drawn = 0usize;
    let mut operations = 0u64;

    while !ctx.cursor.is_at_end() {
        let offset = ctx.cursor.position();
        let instruction = parse_instruction(&mut ctx)?;
        match &instruction {
            Instruction::EndClause => {
                warn!(offset, "Ignoring end clause outside a block");
            }
            top if top.is_drawing() => {
                let limit = options.max_draw_operations;
                let mut draw = DrawContext::new(&mut canvas, ctx.patterns(), options.max_nesting_depth)
                    .with_budget(limit.saturating_sub(operations), limit);
                top.draw(&mut draw, Point::ORIGIN, 0.0)?;
                operations += draw.operations();
                drawn += 1;
            }
            _ => {}
        }
    }

    if let Some(angle) = ctx.pending_rotation.get() {
        warn!(angle, "Discarding rotation with no instruction to apply to");
    }

    debug!(
        drawn,
        operations,
        patterns = ctx.patterns().len(),
        "Document decoded"
    );
    Ok(canvas)
}
