//! The instruction tree and its opcode dispatcher.

use tracing::trace;

use crate::blocks::{PatternDefinition, PatternPlacement, TiledPattern};
use crate::context::{DrawContext, ParseContext};
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::Point;
use crate::shapes::{Circle, Ellipse, Rectangle};

pub const OP_RECTANGLE: u8 = b'R';
pub const OP_CIRCLE: u8 = b'C';
pub const OP_ELLIPSE: u8 = b'E';
pub const OP_TILED: u8 = b'T';
pub const OP_PATTERN: u8 = b'P';
pub const OP_ROTATE: u8 = b'|';
pub const OP_END: u8 = b']';

/// Second byte of a pattern instruction.
pub const MODE_DEFINE: u8 = b'R';
pub const MODE_PLACE: u8 = b'P';

/// A decoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    TiledPattern(TiledPattern),
    DefinePattern(PatternDefinition),
    PlacePattern(PatternPlacement),
    /// Adds to the rotation of the next shape-bearing instruction.
    Rotate(f32),
    /// Closes the innermost open block.
    EndClause,
}

impl Instruction {
    /// Whether drawing this instruction can change pixels.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            Instruction::Rectangle(_)
                | Instruction::Circle(_)
                | Instruction::Ellipse(_)
                | Instruction::TiledPattern(_)
                | Instruction::PlacePattern(_)
        )
    }

    /// Position a placement rotates this instruction about.
    pub fn anchor(&self) -> Point {
        match self {
            Instruction::Rectangle(r) => Point::new(r.x as f64, r.y as f64),
            Instruction::Circle(c) => Point::new(c.x as f64, c.y as f64),
            Instruction::Ellipse(e) => Point::new(e.x as f64, e.y as f64),
            Instruction::PlacePattern(p) => Point::new(p.x as f64, p.y as f64),
            _ => Point::ORIGIN,
        }
    }

    /// Draw at `offset` (canvas fractions) with an inherited rotation.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) -> DecodeResult<()> {
        match self {
            Instruction::Rectangle(r) => {
                ctx.charge()?;
                r.draw(ctx, offset, rotate_in)
            }
            Instruction::Circle(c) => {
                ctx.charge()?;
                c.draw(ctx, offset, rotate_in)
            }
            Instruction::Ellipse(e) => {
                ctx.charge()?;
                e.draw(ctx, offset, rotate_in)
            }
            Instruction::TiledPattern(t) => return t.draw(ctx, offset, rotate_in),
            Instruction::PlacePattern(p) => return p.draw(ctx, offset, rotate_in),
            Instruction::DefinePattern(_) | Instruction::Rotate(_) | Instruction::EndClause => {}
        }
        Ok(())
    }
}

/// Parse one instruction at the cursor.
///
/// `Rotate` updates the pending rotation as a side effect; shape-bearing
/// instructions consume it.
pub fn parse_instruction(ctx: &mut ParseContext<'_, '_>) -> DecodeResult<Instruction> {
    let offset = ctx.cursor.position();
    let opcode = ctx.cursor.take_u8()?;
    trace!(opcode = %char::from(opcode), offset, "Parsing instruction");

    let instruction = match opcode {
        OP_RECTANGLE => Instruction::Rectangle(Rectangle::parse(ctx)?),
        OP_CIRCLE => Instruction::Circle(Circle::parse(ctx)?),
        OP_ELLIPSE => Instruction::Ellipse(Ellipse::parse(ctx)?),
        OP_TILED => Instruction::TiledPattern(TiledPattern::parse(ctx, offset)?),
        OP_PATTERN => {
            let mode_offset = ctx.cursor.position();
            match ctx.cursor.take_u8()? {
                MODE_DEFINE => Instruction::DefinePattern(PatternDefinition::parse(ctx, offset)?),
                MODE_PLACE => Instruction::PlacePattern(PatternPlacement::parse(ctx)?),
                mode => {
                    return Err(DecodeError::UnknownPatternMode {
                        mode,
                        offset: mode_offset,
                    })
                }
            }
        }
        OP_ROTATE => {
            let angle = ctx.cursor.take_f32()?;
            ctx.pending_rotation.push(angle);
            Instruction::Rotate(angle)
        }
        OP_END => Instruction::EndClause,
        other => return Err(DecodeError::UnknownOpcode { opcode: other, offset }),
    };
    Ok(instruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PatternRegistry;
    use crate::cursor::ByteCursor;
    use crate::fill::Fill;

    fn parse_all(bytes: &[u8]) -> (DecodeResult<Vec<Instruction>>, PatternRegistry) {
        let mut registry = PatternRegistry::new();
        let mut ctx = ParseContext::new(ByteCursor::new(bytes), &mut registry, 8);
        let mut out = Vec::new();
        let result = loop {
            if ctx.cursor.is_at_end() {
                break Ok(out);
            }
            match parse_instruction(&mut ctx) {
                Ok(instruction) => out.push(instruction),
                Err(e) => break Err(e),
            }
        };
        (result, registry)
    }

    fn le(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn solid_rect(x: f32, y: f32) -> Vec<u8> {
        let mut bytes = vec![b'R'];
        bytes.extend(le(&[x, y, 0.1, 0.1]));
        bytes.extend_from_slice(&[b'F', 1, 2, 3, 4]);
        bytes
    }

    #[test]
    fn test_parse_rectangle() {
        let (result, _) = parse_all(&solid_rect(0.5, 0.25));
        let instructions = result.unwrap();
        assert_eq!(instructions.len(), 1);
        let Instruction::Rectangle(rect) = &instructions[0] else {
            panic!("expected a rectangle, got {:?}", instructions[0]);
        };
        assert_eq!((rect.x, rect.y), (0.5, 0.25));
        assert_eq!(rect.rotation, 0.0);
        assert!(matches!(rect.fill, Fill::Solid(_)));
    }

    #[test]
    fn test_rotations_accumulate_into_next_shape() {
        let mut bytes = vec![b'|'];
        bytes.extend(le(&[0.25]));
        bytes.push(b'|');
        bytes.extend(le(&[0.5]));
        bytes.extend(solid_rect(0.5, 0.5));
        bytes.extend(solid_rect(0.5, 0.5));

        let instructions = parse_all(&bytes).0.unwrap();
        assert_eq!(instructions.len(), 4);
        let (Instruction::Rectangle(first), Instruction::Rectangle(second)) =
            (&instructions[2], &instructions[3])
        else {
            panic!("expected two rectangles");
        };
        assert_eq!(first.rotation, 0.75);
        assert_eq!(second.rotation, 0.0);
    }

    #[test]
    fn test_unknown_opcode_offset() {
        let mut bytes = solid_rect(0.0, 0.0);
        let offset = bytes.len();
        bytes.push(b'Z');
        assert_eq!(
            parse_all(&bytes).0.unwrap_err(),
            DecodeError::UnknownOpcode { opcode: b'Z', offset }
        );
    }

    #[test]
    fn test_unknown_pattern_mode() {
        let bytes = [b'P', b'X', 0, 0];
        assert_eq!(
            parse_all(&bytes).0.unwrap_err(),
            DecodeError::UnknownPatternMode { mode: b'X', offset: 1 }
        );
    }

    #[test]
    fn test_define_pattern_registers_body() {
        let mut bytes = vec![b'P', b'R'];
        bytes.extend_from_slice(&3u16.to_le_bytes());
        bytes.extend(solid_rect(0.0, 0.0));
        bytes.push(b']');

        let (result, registry) = parse_all(&bytes);
        let instructions = result.unwrap();
        assert!(matches!(&instructions[0], Instruction::DefinePattern(def) if def.id == 3));
        assert_eq!(registry.lookup(3).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_end_clause() {
        let mut bytes = vec![b'T'];
        bytes.extend(le(&[0.1, 0.1]));
        bytes.extend_from_slice(&[1, 0, 1, 0]);
        bytes.extend(solid_rect(0.0, 0.0));
        assert_eq!(
            parse_all(&bytes).0.unwrap_err(),
            DecodeError::UnterminatedBlock { opened_at: 0 }
        );
    }

    #[test]
    fn test_nested_block_closes_innermost() {
        let mut bytes = vec![b'P', b'R', 1, 0];
        bytes.extend([b'T']);
        bytes.extend(le(&[0.1, 0.1]));
        bytes.extend_from_slice(&[2, 0, 2, 0]);
        bytes.extend(solid_rect(0.0, 0.0));
        bytes.push(b']');
        bytes.extend(solid_rect(0.5, 0.5));
        bytes.push(b']');

        let (result, registry) = parse_all(&bytes);
        assert_eq!(result.unwrap().len(), 1);
        let body = registry.lookup(1).unwrap();
        assert_eq!(body.len(), 2);
        assert!(matches!(&body[0], Instruction::TiledPattern(t) if t.children.len() == 1));
        assert!(matches!(&body[1], Instruction::Rectangle(_)));
    }

    #[test]
    fn test_anchor_and_drawing_flags() {
        let instructions = parse_all(&solid_rect(0.5, 0.25)).0.unwrap();
        assert_eq!(instructions[0].anchor(), Point::new(0.5, 0.25));
        assert!(instructions[0].is_drawing());
        assert!(!Instruction::Rotate(1.0).is_drawing());
        assert_eq!(Instruction::EndClause.anchor(), Point::ORIGIN);
    }
}
