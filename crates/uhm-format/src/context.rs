//! State threaded through parsing and drawing.
//!
//! Nothing here is global: each decode call builds its own contexts and
//! pattern registry, and drops them when it returns.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use crate::canvas::Canvas;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::instruction::Instruction;

/// Rotation waiting for the next shape-bearing instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingRotation(Option<f32>);

impl PendingRotation {
    /// Add `angle` (radians) to whatever is already pending.
    pub fn push(&mut self, angle: f32) {
        self.0 = Some(self.0.map_or(angle, |pending| pending + angle));
    }

    /// Consume the pending rotation, or 0 if none is set.
    pub fn take(&mut self) -> f32 {
        self.0.take().unwrap_or(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<f32> {
        self.0
    }
}

/// Pattern bodies registered by `DefinePattern` blocks, keyed by ID.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    patterns: HashMap<u16, Rc<[Instruction]>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `body` under `id`, replacing any earlier definition.
    pub fn define(&mut self, id: u16, body: Rc<[Instruction]>) {
        if self.patterns.insert(id, body).is_some() {
            warn!(id, "Pattern redefined");
        }
    }

    /// Look up a pattern body.
    pub fn lookup(&self, id: u16) -> DecodeResult<&[Instruction]> {
        self.patterns
            .get(&id)
            .map(|body| &**body)
            .ok_or(DecodeError::UnknownPattern { id })
    }

    pub fn contains(&self, id: u16) -> bool {
        self.patterns.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }
}

/// Parser state: the cursor, the pending rotation and the pattern registry.
#[derive(Debug)]
pub struct ParseContext<'a, 'r> {
    pub cursor: ByteCursor<'a>,
    pub pending_rotation: PendingRotation,
    patterns: &'r mut PatternRegistry,
    depth: usize,
    max_depth: usize,
}

impl<'a, 'r> ParseContext<'a, 'r> {
    pub fn new(cursor: ByteCursor<'a>, patterns: &'r mut PatternRegistry, max_depth: usize) -> Self {
        Self {
            cursor,
            pending_rotation: PendingRotation::default(),
            patterns,
            depth: 0,
            max_depth,
        }
    }

    /// Consume the pending rotation for the instruction being parsed.
    pub fn capture_rotation(&mut self) -> f32 {
        self.pending_rotation.take()
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &*self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut PatternRegistry {
        &mut *self.patterns
    }

    /// Current block nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter_block(&mut self) -> DecodeResult<()> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep { limit: self.max_depth });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Renderer state: the canvas being drawn and the patterns placements read.
///
/// Every shape draw, tile cell and pattern placement costs one operation.
/// Once `budget` operations are spent, further draws fail with
/// `DrawBudgetExceeded`, which bounds the work of fan-out placements that
/// stay within the nesting limit.
#[derive(Debug)]
pub struct DrawContext<'c> {
    pub canvas: &'c mut Canvas,
    pub patterns: &'c PatternRegistry,
    depth: usize,
    max_depth: usize,
    operations: u64,
    budget: u64,
    limit: u64,
}

impl<'c> DrawContext<'c> {
    pub fn new(canvas: &'c mut Canvas, patterns: &'c PatternRegistry, max_depth: usize) -> Self {
        Self {
            canvas,
            patterns,
            depth: 0,
            max_depth,
            operations: 0,
            budget: u64::MAX,
            limit: u64::MAX,
        }
    }

    /// Allow at most `budget` operations, reporting `limit` when exceeded.
    ///
    /// The decoder spreads one document-wide limit across the contexts it
    /// creates, so `budget` is what remains of `limit`.
    pub fn with_budget(mut self, budget: u64, limit: u64) -> Self {
        self.budget = budget;
        self.limit = limit;
        self
    }

    /// Operations spent so far.
    pub fn operations(&self) -> u64 {
        self.operations
    }

    pub(crate) fn charge(&mut self) -> DecodeResult<()> {
        if self.operations >= self.budget {
            return Err(DecodeError::DrawBudgetExceeded { limit: self.limit });
        }
        self.operations += 1;
        Ok(())
    }

    /// Canvas size in pixels, as floats for coordinate math.
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    pub(crate) fn enter_placement(&mut self) -> DecodeResult<()> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep { limit: self.max_depth });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_placement(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
