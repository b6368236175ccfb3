//! Gradient sampling.
//!
//! Both gradients take their geometry in fractions of a shape's bounding box
//! and sample at pixel-space points.

use crate::color::Color;
use crate::geometry::{BoundingBox, Point};

/// Interpolate every channel of `a` towards `b`.
///
/// `t` is clamped to `[0, 1]`; each channel is rounded to the nearest value,
/// so `t == 0` yields `a` and `t == 1` yields `b` exactly.
pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let (a, b) = (a.to_bytes(), b.to_bytes());
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let value = a[i] as f64 * (1.0 - t) + b[i] as f64 * t;
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    Color::from_bytes(out)
}

/// Sample a linear gradient running from `p1` to `p2`.
///
/// `point` is projected onto the segment; the projection scalar selects the
/// mix between `from` and `to`. A degenerate segment yields `from`.
pub fn linear_gradient(
    point: Point,
    bbox: &BoundingBox,
    p1: Point,
    p2: Point,
    from: Color,
    to: Color,
) -> Color {
    let a = bbox.to_pixels(p1);
    let b = bbox.to_pixels(p2);
    let direction = b.sub(a);
    let length_sq = direction.dot(direction);
    let t = if length_sq == 0.0 {
        0.0
    } else {
        point.sub(a).dot(direction) / length_sq
    };
    lerp_color(from, to, t)
}

/// Sample a radial gradient around `center`.
///
/// `radius` is a fraction of the bounding box diagonal. A zero radius puts
/// every point but the center itself at the outer color.
pub fn radial_gradient(
    point: Point,
    bbox: &BoundingBox,
    center: Point,
    radius: f64,
    inner: Color,
    outer: Color,
) -> Color {
    let c = bbox.to_pixels(center);
    let distance = point.distance(c);
    let extent = radius * bbox.diagonal();
    let t = if extent == 0.0 {
        if distance == 0.0 { 0.0 } else { 1.0 }
    } else {
        distance / extent
    };
    lerp_color(inner, outer, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::from_bytes([0, 0, 0, 255]);
    const WHITE: Color = Color::from_bytes([255, 255, 255, 255]);

    fn unit_box() -> BoundingBox {
        BoundingBox { x: 0.0, y: 0.0, width: 100.0, height: 100.0 }
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let a = Color::from_packed(0x1234_5678);
        let b = Color::from_packed(0x9ABC_DEF0);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, -3.0), a);
        assert_eq!(lerp_color(a, b, 7.0), b);
    }

    #[test]
    fn test_lerp_rounds_channels() {
        let mid = lerp_color(
            Color::from_bytes([0, 10, 255, 1]),
            Color::from_bytes([255, 20, 0, 2]),
            0.5,
        );
        // 127.5 -> 128, 15 -> 15, 127.5 -> 128, 1.5 -> 2
        assert_eq!(mid.to_bytes(), [128, 15, 128, 2]);
    }

    #[test]
    fn test_linear_gradient_projection() {
        let bbox = unit_box();
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(1.0, 0.0);
        assert_eq!(linear_gradient(Point::new(0.0, 40.0), &bbox, p1, p2, BLACK, WHITE), BLACK);
        assert_eq!(linear_gradient(Point::new(100.0, 3.0), &bbox, p1, p2, BLACK, WHITE), WHITE);
        assert_eq!(
            linear_gradient(Point::new(50.0, 99.0), &bbox, p1, p2, BLACK, WHITE).to_bytes(),
            [128, 128, 128, 255]
        );
        // Beyond either end clamps.
        assert_eq!(linear_gradient(Point::new(-20.0, 0.0), &bbox, p1, p2, BLACK, WHITE), BLACK);
        assert_eq!(linear_gradient(Point::new(250.0, 0.0), &bbox, p1, p2, BLACK, WHITE), WHITE);
    }

    #[test]
    fn test_linear_gradient_follows_vertical_axis() {
        let bbox = BoundingBox { x: 10.0, y: 20.0, width: 40.0, height: 80.0 };
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(0.0, 1.0);
        assert_eq!(linear_gradient(Point::new(30.0, 100.0), &bbox, p1, p2, BLACK, WHITE), WHITE);
        assert_eq!(linear_gradient(Point::new(30.0, 20.0), &bbox, p1, p2, BLACK, WHITE), BLACK);
    }

    #[test]
    fn test_linear_gradient_degenerate_segment() {
        let p = Point::new(0.5, 0.5);
        let color = linear_gradient(Point::new(90.0, 90.0), &unit_box(), p, p, BLACK, WHITE);
        assert_eq!(color, BLACK);
    }

    #[test]
    fn test_radial_gradient() {
        let bbox = unit_box();
        let center = Point::new(0.5, 0.5);
        // Diagonal is 100*sqrt(2); radius 0.5 reaches ~70.7 pixels.
        assert_eq!(radial_gradient(Point::new(50.0, 50.0), &bbox, center, 0.5, BLACK, WHITE), BLACK);
        assert_eq!(radial_gradient(Point::new(0.0, 0.0), &bbox, center, 0.5, BLACK, WHITE), WHITE);
        let gray = Color::from_bytes([200, 200, 200, 255]);
        let halfway = radial_gradient(Point::new(75.0, 75.0), &bbox, center, 0.5, BLACK, gray);
        assert_eq!(halfway.to_bytes(), [100, 100, 100, 255]);
    }

    #[test]
    fn test_radial_gradient_zero_radius() {
        let bbox = unit_box();
        let center = Point::new(0.5, 0.5);
        assert_eq!(radial_gradient(Point::new(50.0, 50.0), &bbox, center, 0.0, BLACK, WHITE), BLACK);
        assert_eq!(radial_gradient(Point::new(51.0, 50.0), &bbox, center, 0.0, BLACK, WHITE), WHITE);
    }
}
