//! Byte-level writer for UHM documents.
//!
//! The builder only serializes. It does not check that blocks are balanced or
//! that placements refer to defined patterns; the decoder reports those.

use crate::color::Color;
use crate::decoder::MAGIC;
use crate::fill::Fill;
use crate::geometry::Point;
use crate::instruction::{
    MODE_DEFINE, MODE_PLACE, OP_CIRCLE, OP_ELLIPSE, OP_END, OP_PATTERN, OP_RECTANGLE, OP_ROTATE,
    OP_TILED,
};

/// Appends instructions to a document buffer.
///
/// # Example
///
/// ```
/// use uhm_format::{decode, Color, Fill, SceneBuilder};
///
/// let bytes = SceneBuilder::new(Color::from_packed(0xFF00_0000))
///     .rectangle(0.5, 0.5, 0.2, 0.2, Fill::Solid(Color::from_packed(0xFFFF_FFFF)))
///     .to_vec();
/// let canvas = decode(&bytes, 10, 10).unwrap();
/// assert_eq!(canvas.pixel(5, 5), Some(Color::from_packed(0xFFFF_FFFF)));
/// ```
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    bytes: Vec<u8>,
}

impl SceneBuilder {
    /// Start a document with the header and background color.
    pub fn new(background: Color) -> Self {
        let mut builder = Self { bytes: Vec::with_capacity(64) };
        for b in MAGIC {
            builder.u8(b);
        }
        builder.color(background);
        builder
    }

    pub fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Fill) -> &mut Self {
        self.u8(OP_RECTANGLE).f32(x).f32(y).f32(width).f32(height).fill(&fill)
    }

    pub fn circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill) -> &mut Self {
        self.u8(OP_CIRCLE).f32(x).f32(y).f32(radius).fill(&fill)
    }

    pub fn ellipse(&mut self, x: f32, y: f32, radius_x: f32, radius_y: f32, fill: Fill) -> &mut Self {
        self.u8(OP_ELLIPSE).f32(x).f32(y).f32(radius_x).f32(radius_y).fill(&fill)
    }

    /// Rotate the next shape-bearing instruction by `radians`.
    pub fn rotate(&mut self, radians: f32) -> &mut Self {
        self.u8(OP_ROTATE).f32(radians)
    }

    /// Open a tiled block; close it with [`end_block`](Self::end_block).
    pub fn begin_tiled(&mut self, offset_x: f32, offset_y: f32, rows: u16, cols: u16) -> &mut Self {
        self.u8(OP_TILED).f32(offset_x).f32(offset_y).u16(rows).u16(cols)
    }

    /// Open a pattern definition; close it with [`end_block`](Self::end_block).
    pub fn begin_pattern(&mut self, id: u16) -> &mut Self {
        self.u8(OP_PATTERN).u8(MODE_DEFINE).u16(id)
    }

    pub fn end_block(&mut self) -> &mut Self {
        self.u8(OP_END)
    }

    pub fn place_pattern(&mut self, id: u16, x: f32, y: f32) -> &mut Self {
        self.u8(OP_PATTERN).u8(MODE_PLACE).u16(id).f32(x).f32(y)
    }

    pub fn fill(&mut self, fill: &Fill) -> &mut Self {
        self.u8(fill.tag());
        match *fill {
            Fill::Solid(color) => self.color(color),
            Fill::Linear { p1, p2, from, to } => self.point(p1).point(p2).color(from).color(to),
            Fill::Radial { center, radius, inner, outer } => {
                self.point(center).f32(radius as f32).color(inner).color(outer)
            }
        }
    }

    pub fn color(&mut self, color: Color) -> &mut Self {
        self.bytes.extend_from_slice(&color.to_bytes());
        self
    }

    fn point(&mut self, p: Point) -> &mut Self {
        self.f32(p.x as f32).f32(p.y as f32)
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy of the document written so far.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ParseContext, PatternRegistry};
    use crate::cursor::ByteCursor;
    use crate::instruction::{parse_instruction, Instruction};

    #[test]
    fn test_header() {
        let builder = SceneBuilder::new(Color::from_bytes([1, 2, 3, 4]));
        assert_eq!(builder.as_bytes(), b"UHM\x01\x02\x03\x04");
    }

    #[test]
    fn test_solid_rectangle_bytes() {
        let mut builder = SceneBuilder::new(Color::TRANSPARENT);
        builder.rectangle(0.5, 0.5, 0.2, 0.2, Fill::Solid(Color::from_packed(0xAABB_CCDD)));
        let bytes = builder.to_vec();

        let mut expected = b"UHM\0\0\0\0R".to_vec();
        for v in [0.5f32, 0.5, 0.2, 0.2] {
            expected.extend_from_slice(&v.to_le_bytes());
        }
        expected.extend_from_slice(&[b'F', 0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_built_instructions_parse_back() {
        let gradient = Fill::Linear {
            p1: Point::new(0.0, 0.5),
            p2: Point::new(1.0, 0.5),
            from: Color::from_packed(1),
            to: Color::from_packed(2),
        };
        let mut builder = SceneBuilder::new(Color::TRANSPARENT);
        builder
            .rotate(0.5)
            .circle(0.25, 0.75, 0.1, gradient)
            .begin_pattern(2)
            .ellipse(0.0, 0.0, 0.1, 0.2, Fill::Solid(Color::from_packed(3)))
            .end_block()
            .place_pattern(2, 0.5, 0.5);
        let bytes = builder.to_vec();

        let mut registry = PatternRegistry::new();
        let mut ctx = ParseContext::new(ByteCursor::new(&bytes[7..]), &mut registry, 8);
        let mut parsed = Vec::new();
        while !ctx.cursor.is_at_end() {
            parsed.push(parse_instruction(&mut ctx).unwrap());
        }

        assert_eq!(parsed.len(), 4);
        let Instruction::Circle(circle) = &parsed[1] else {
            panic!("expected a circle, got {:?}", parsed[1]);
        };
        assert_eq!(circle.rotation, 0.5);
        assert_eq!(circle.fill, gradient);
        assert!(matches!(&parsed[3], Instruction::PlacePattern(p) if p.id == 2 && p.x == 0.5));
    }
}
