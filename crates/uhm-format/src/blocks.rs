//! Tiled patterns, pattern definitions and pattern placements.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::context::{DrawContext, ParseContext};
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::{Point, Transform};
use crate::instruction::{parse_instruction, Instruction};

/// Collect child instructions until the closing `EndClause`.
///
/// `opened_at` is the offset of the opcode that opened the block, reported if
/// the data runs out at an instruction boundary before the block is closed.
pub(crate) fn parse_block_body(
    ctx: &mut ParseContext<'_, '_>,
    opened_at: usize,
) -> DecodeResult<Vec<Instruction>> {
    ctx.enter_block()?;
    let mut children = Vec::new();
    loop {
        if ctx.cursor.is_at_end() {
            return Err(DecodeError::UnterminatedBlock { opened_at });
        }
        match parse_instruction(ctx)? {
            Instruction::EndClause => break,
            child => children.push(child),
        }
    }
    ctx.leave_block();
    Ok(children)
}

/// A block of instructions redrawn on a `rows` x `cols` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TiledPattern {
    /// Horizontal step between columns, in canvas fractions.
    pub offset_x: f32,
    /// Vertical step between rows, in canvas fractions.
    pub offset_y: f32,
    pub rows: u16,
    pub cols: u16,
    pub children: Vec<Instruction>,
    pub rotation: f32,
}

impl TiledPattern {
    /// Parse the fields and body following the `'T'` opcode at `opened_at`.
    pub fn parse(ctx: &mut ParseContext<'_, '_>, opened_at: usize) -> DecodeResult<Self> {
        let rotation = ctx.capture_rotation();
        let offset_x = ctx.cursor.take_f32()?;
        let offset_y = ctx.cursor.take_f32()?;
        let rows = ctx.cursor.take_u16()?;
        let cols = ctx.cursor.take_u16()?;
        let children = parse_block_body(ctx, opened_at)?;
        Ok(Self {
            offset_x,
            offset_y,
            rows,
            cols,
            children,
            rotation,
        })
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) -> DecodeResult<()> {
        let rotation = self.rotation as f64 + rotate_in;
        if self.rotation != 0.0 || rotate_in != 0.0 {
            return Err(DecodeError::UnsupportedRotation { rotation: rotation as f32 });
        }

        trace!(
            rows = self.rows,
            cols = self.cols,
            children = self.children.len(),
            "Drawing tiled pattern"
        );

        for row in 0..self.rows {
            for col in 0..self.cols {
                ctx.charge()?;
                let cell = offset.add(Point::new(
                    self.offset_x as f64 * col as f64,
                    self.offset_y as f64 * row as f64,
                ));
                for child in &self.children {
                    child.draw(ctx, cell, 0.0)?;
                }
            }
        }
        Ok(())
    }
}

/// A named instruction group; registered while parsing, never drawn itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    pub id: u16,
    pub body: Rc<[Instruction]>,
}

impl PatternDefinition {
    /// Parse the ID and body following `'P' 'R'`, and register the body.
    pub fn parse(ctx: &mut ParseContext<'_, '_>, opened_at: usize) -> DecodeResult<Self> {
        let id = ctx.cursor.take_u16()?;
        let body: Rc<[Instruction]> = parse_block_body(ctx, opened_at)?.into();
        debug!(id, instructions = body.len(), "Pattern registered");
        ctx.patterns_mut().define(id, Rc::clone(&body));
        Ok(Self { id, body })
    }
}

/// An instance of a registered pattern at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternPlacement {
    pub id: u16,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl PatternPlacement {
    /// Parse the fields following `'P' 'P'`.
    pub fn parse(ctx: &mut ParseContext<'_, '_>) -> DecodeResult<Self> {
        let rotation = ctx.capture_rotation();
        let id = ctx.cursor.take_u16()?;
        let x = ctx.cursor.take_f32()?;
        let y = ctx.cursor.take_f32()?;
        Ok(Self { id, x, y, rotation })
    }

    /// Draw the pattern body around this placement.
    ///
    /// The pattern's origin lands on the placement position. Each child's
    /// anchor is rotated about that origin by the placement's total rotation,
    /// and the same rotation is handed down so nested shapes and fills turn
    /// with the pattern.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) -> DecodeResult<()> {
        let patterns = ctx.patterns;
        let body = patterns.lookup(self.id)?;
        let angle = self.rotation as f64 + rotate_in;
        let target = Point::new(self.x as f64, self.y as f64).add(offset);
        let rotation = Transform::rotate(angle);

        trace!(id = self.id, x = target.x, y = target.y, angle, "Placing pattern");

        ctx.charge()?;
        ctx.enter_placement()?;
        for child in body {
            let anchor = child.anchor();
            let shift = rotation.apply_vector(anchor).sub(anchor);
            child.draw(ctx, target.add(shift), angle)?;
        }
        ctx.leave_placement();
        Ok(())
    }
}
