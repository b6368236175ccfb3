//! Rectangle, circle and ellipse primitives.
//!
//! Positions are fractions of the canvas and name the shape's center. Each
//! draw receives a translation (in canvas fractions) and a rotation inherited
//! from enclosing pattern placements; the shape's own captured rotation is
//! added on top. Covered pixels are overwritten, pixels outside the canvas
//! are skipped. Sizes are taken by magnitude, so a negative width or radius
//! draws the same shape as its positive counterpart.

use tracing::trace;

use crate::context::{DrawContext, ParseContext};
use crate::error::DecodeResult;
use crate::fill::Fill;
use crate::geometry::{pixel_span, snap, BoundingBox, Point, Transform};

/// Axis-aligned (before rotation) rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Fill,
    pub rotation: f32,
}

impl Rectangle {
    /// Parse the fields following the `'R'` opcode.
    pub fn parse(ctx: &mut ParseContext<'_, '_>) -> DecodeResult<Self> {
        let rotation = ctx.capture_rotation();
        let cursor = &mut ctx.cursor;
        Ok(Self {
            x: cursor.take_f32()?,
            y: cursor.take_f32()?,
            width: cursor.take_f32()?,
            height: cursor.take_f32()?,
            fill: Fill::parse(cursor)?,
            rotation,
        })
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) {
        let (cw, ch) = ctx.canvas_size();
        let center = Point::new(
            snap((self.x as f64 + offset.x) * cw),
            snap((self.y as f64 + offset.y) * ch),
        );
        let hw = snap(self.width.abs() as f64 * cw / 2.0);
        let hh = snap(self.height.abs() as f64 * ch / 2.0);
        let angle = self.rotation as f64 + rotate_in;

        trace!(
            cx = center.x,
            cy = center.y,
            width = hw * 2.0,
            height = hh * 2.0,
            angle,
            "Drawing rectangle"
        );

        let (reach_x, reach_y) = if angle == 0.0 {
            (hw, hh)
        } else {
            let r = hw.hypot(hh);
            (r, r)
        };
        let to_local = Transform::rotate(-angle);
        let bbox = BoundingBox::centered(center, hw, hh);
        let fill = self.fill.rotated(angle);

        fill_covered(ctx, center, (reach_x, reach_y), |dx, dy| {
            let local = to_local.apply_vector(Point::new(dx, dy));
            local.x >= -hw && local.x < hw && local.y >= -hh && local.y < hh
        }, &fill, &bbox);
    }
}

/// Circle; the radius scales with canvas width.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill: Fill,
    pub rotation: f32,
}

impl Circle {
    /// Parse the fields following the `'C'` opcode.
    pub fn parse(ctx: &mut ParseContext<'_, '_>) -> DecodeResult<Self> {
        let rotation = ctx.capture_rotation();
        let cursor = &mut ctx.cursor;
        Ok(Self {
            x: cursor.take_f32()?,
            y: cursor.take_f32()?,
            radius: cursor.take_f32()?,
            fill: Fill::parse(cursor)?,
            rotation,
        })
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) {
        let (cw, ch) = ctx.canvas_size();
        let center = Point::new(
            snap((self.x as f64 + offset.x) * cw),
            snap((self.y as f64 + offset.y) * ch),
        );
        let r = snap(self.radius.abs() as f64 * cw);
        let angle = self.rotation as f64 + rotate_in;

        trace!(cx = center.x, cy = center.y, radius = r, angle, "Drawing circle");

        // Rotation only affects the fill; the outline is rotation invariant.
        let bbox = BoundingBox::centered(center, r, r);
        let fill = self.fill.rotated(angle);
        let r_sq = r * r;

        fill_covered(ctx, center, (r, r), |dx, dy| {
            dx * dx + dy * dy < r_sq
        }, &fill, &bbox);
    }
}

/// Ellipse with independent horizontal and vertical radii.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub x: f32,
    pub y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    pub fill: Fill,
    pub rotation: f32,
}

impl Ellipse {
    /// Parse the fields following the `'E'` opcode.
    pub fn parse(ctx: &mut ParseContext<'_, '_>) -> DecodeResult<Self> {
        let rotation = ctx.capture_rotation();
        let cursor = &mut ctx.cursor;
        Ok(Self {
            x: cursor.take_f32()?,
            y: cursor.take_f32()?,
            radius_x: cursor.take_f32()?,
            radius_y: cursor.take_f32()?,
            fill: Fill::parse(cursor)?,
            rotation,
        })
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>, offset: Point, rotate_in: f64) {
        let (cw, ch) = ctx.canvas_size();
        let center = Point::new(
            snap((self.x as f64 + offset.x) * cw),
            snap((self.y as f64 + offset.y) * ch),
        );
        let rx = snap(self.radius_x.abs() as f64 * cw);
        let ry = snap(self.radius_y.abs() as f64 * ch);
        let angle = self.rotation as f64 + rotate_in;

        trace!(cx = center.x, cy = center.y, rx, ry, angle, "Drawing ellipse");

        let reach = if angle == 0.0 {
            (rx, ry)
        } else {
            let r = rx.max(ry);
            (r, r)
        };
        let to_local = Transform::rotate(-angle);
        let bbox = BoundingBox::centered(center, rx, ry);
        let fill = self.fill.rotated(angle);

        fill_covered(ctx, center, reach, |dx, dy| {
            let local = to_local.apply_vector(Point::new(dx, dy));
            let nx = local.x / rx;
            let ny = local.y / ry;
            nx * nx + ny * ny <= 1.0
        }, &fill, &bbox);
    }
}

/// Scan the pixels within `reach` of `center` and paint those `contains`
/// accepts. `contains` gets the pixel's offset from the center.
fn fill_covered(
    ctx: &mut DrawContext<'_>,
    center: Point,
    reach: (f64, f64),
    contains: impl Fn(f64, f64) -> bool,
    fill: &Fill,
    bbox: &BoundingBox,
) {
    let canvas = &mut *ctx.canvas;
    let rows = pixel_span(center.y - reach.1, center.y + reach.1 + 1.0, canvas.height());
    let cols = pixel_span(center.x - reach.0, center.x + reach.0 + 1.0, canvas.width());
    for py in rows {
        for px in cols.clone() {
            let point = Point::new(px as f64, py as f64);
            if contains(point.x - center.x, point.y - center.y) {
                canvas.set_pixel(px, py, fill.sample(point, bbox));
            }
        }
    }
}
