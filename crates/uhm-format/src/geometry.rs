//! Points, rotations and bounding boxes.
//!
//! Document coordinates are fractions: of the canvas for shape positions and
//! extents, of the shape's own bounding box for gradient endpoints. Pixel
//! space is reached by scaling with the canvas or box dimensions.

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Local origin of a shape's bounding box, in box fractions.
    pub const BOX_CENTER: Point = Point { x: 0.5, y: 0.5 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).length()
    }
}

/// 2D rotation about a pivot.
/// Represents: [a c e]
///             [b d f]
///             [0 0 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create identity transform.
    pub fn identity() -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Create translation transform.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: tx, f: ty,
        }
    }

    /// Create rotation transform (radians). Zero yields the exact identity.
    pub fn rotate(angle: f64) -> Self {
        if angle == 0.0 {
            return Self::identity();
        }
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            a: cos, b: sin,
            c: -sin, d: cos,
            e: 0.0, f: 0.0,
        }
    }

    /// Rotation by `angle` around `pivot`.
    pub fn rotate_about(angle: f64, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y)
            .multiply(&Self::rotate(angle))
            .multiply(&Self::translate(-pivot.x, -pivot.y))
    }

    /// Multiply two transforms.
    pub fn multiply(&self, other: &Transform) -> Self {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transform a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Transform a vector (ignores translation).
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }
}

/// Axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box of the given half extents centered on `center`.
    pub fn centered(center: Point, half_width: f64, half_height: f64) -> Self {
        Self {
            x: center.x - half_width,
            y: center.y - half_height,
            width: half_width * 2.0,
            height: half_height * 2.0,
        }
    }

    /// Map a fractional point of this box into pixel space.
    pub fn to_pixels(&self, fraction: Point) -> Point {
        Point::new(
            self.x + fraction.x * self.width,
            self.y + fraction.y * self.height,
        )
    }

    pub fn diagonal(&self) -> f64 {
        Point::new(self.width, self.height).length()
    }
}

/// Snap a pixel-space value to 1/256 px.
///
/// Document values are `f32`, so products like `0.2 * 100` come out a hair
/// off the pixel edge they name. Snapping puts them back on it.
pub(crate) fn snap(v: f64) -> f64 {
    (v * 256.0).round() / 256.0
}

/// Integer pixel range covering `[lo, hi)` clipped to `0..limit`.
///
/// Non-finite bounds produce an empty range.
pub(crate) fn pixel_span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return 0..0;
    }
    let start = lo.floor().max(0.0).min(limit as f64) as u32;
    let end = hi.ceil().max(0.0).min(limit as f64) as u32;
    start..end.max(start)
}
