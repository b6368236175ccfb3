//! Fill specs: how a shape colors the pixels it covers.

use crate::color::Color;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::{BoundingBox, Point, Transform};
use crate::gradient::{linear_gradient, radial_gradient};

pub const FILL_SOLID: u8 = b'F';
pub const FILL_LINEAR: u8 = b'L';
pub const FILL_RADIAL: u8 = b'C';

/// Color rule attached to a shape.
///
/// Gradient geometry is given in fractions of the shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Solid color.
    Solid(Color),
    /// Linear gradient from `p1` to `p2`.
    Linear {
        p1: Point,
        p2: Point,
        from: Color,
        to: Color,
    },
    /// Radial gradient around `center`; `radius` is a fraction of the box diagonal.
    Radial {
        center: Point,
        radius: f64,
        inner: Color,
        outer: Color,
    },
}

impl Fill {
    /// Read a fill-type byte and the fields that follow it.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let offset = cursor.position();
        let fill = cursor.take_u8()?;
        match fill {
            FILL_SOLID => Ok(Fill::Solid(read_color(cursor)?)),
            FILL_LINEAR => {
                let p1 = read_point(cursor)?;
                let p2 = read_point(cursor)?;
                Ok(Fill::Linear {
                    p1,
                    p2,
                    from: read_color(cursor)?,
                    to: read_color(cursor)?,
                })
            }
            FILL_RADIAL => {
                let center = read_point(cursor)?;
                let radius = cursor.take_f32()? as f64;
                Ok(Fill::Radial {
                    center,
                    radius,
                    inner: read_color(cursor)?,
                    outer: read_color(cursor)?,
                })
            }
            other => Err(DecodeError::UnknownFillType { fill: other, offset }),
        }
    }

    /// Wire tag of this fill.
    pub fn tag(&self) -> u8 {
        match self {
            Fill::Solid(_) => FILL_SOLID,
            Fill::Linear { .. } => FILL_LINEAR,
            Fill::Radial { .. } => FILL_RADIAL,
        }
    }

    /// The same fill with its gradient geometry rotated by `angle` around the
    /// box center.
    pub fn rotated(&self, angle: f64) -> Fill {
        if angle == 0.0 {
            return *self;
        }
        let rotation = Transform::rotate_about(angle, Point::BOX_CENTER);
        match *self {
            Fill::Solid(color) => Fill::Solid(color),
            Fill::Linear { p1, p2, from, to } => Fill::Linear {
                p1: rotation.apply(p1),
                p2: rotation.apply(p2),
                from,
                to,
            },
            Fill::Radial { center, radius, inner, outer } => Fill::Radial {
                center: rotation.apply(center),
                radius,
                inner,
                outer,
            },
        }
    }

    /// Color at pixel-space `point` for a shape bounded by `bbox`.
    pub fn sample(&self, point: Point, bbox: &BoundingBox) -> Color {
        match *self {
            Fill::Solid(color) => color,
            Fill::Linear { p1, p2, from, to } => linear_gradient(point, bbox, p1, p2, from, to),
            Fill::Radial { center, radius, inner, outer } => {
                radial_gradient(point, bbox, center, radius, inner, outer)
            }
        }
    }
}

fn read_color(cursor: &mut ByteCursor<'_>) -> DecodeResult<Color> {
    cursor.take_u32().map(Color::from_packed)
}

fn read_point(cursor: &mut ByteCursor<'_>) -> DecodeResult<Point> {
    let x = cursor.take_f32()? as f64;
    let y = cursor.take_f32()? as f64;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn floats(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_solid() {
        let bytes = [b'F', 0xDD, 0xCC, 0xBB, 0xAA];
        let fill = Fill::parse(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(fill, Fill::Solid(Color::from_packed(0xAABBCCDD)));
    }

    #[test]
    fn test_parse_linear() {
        let mut bytes = vec![b'L'];
        bytes.extend(floats(&[0.0, 0.25, 1.0, 0.75]));
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut cursor = ByteCursor::new(&bytes);
        let fill = Fill::parse(&mut cursor).unwrap();
        assert_eq!(
            fill,
            Fill::Linear {
                p1: Point::new(0.0, 0.25),
                p2: Point::new(1.0, 0.75),
                from: Color::from_bytes([1, 2, 3, 4]),
                to: Color::from_bytes([5, 6, 7, 8]),
            }
        );
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_parse_radial() {
        let mut bytes = vec![b'C'];
        bytes.extend(floats(&[0.5, 0.5, 0.25]));
        bytes.extend_from_slice(&[0; 8]);
        let fill = Fill::parse(&mut ByteCursor::new(&bytes)).unwrap();
        assert!(matches!(fill, Fill::Radial { radius, .. } if radius == 0.25));
    }

    #[test]
    fn test_unknown_fill_type() {
        let bytes = [b'Q', 0, 0, 0, 0];
        let err = Fill::parse(&mut ByteCursor::new(&bytes)).unwrap_err();
        assert_eq!(err, DecodeError::UnknownFillType { fill: b'Q', offset: 0 });
    }

    #[test]
    fn test_truncated_fill() {
        let bytes = [b'L', 0, 0];
        let err = Fill::parse(&mut ByteCursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEnd { offset: 1, .. }));
    }

    #[test]
    fn test_rotation_moves_gradient_endpoints() {
        let fill = Fill::Linear {
            p1: Point::new(0.0, 0.5),
            p2: Point::new(1.0, 0.5),
            from: Color::TRANSPARENT,
            to: Color::TRANSPARENT,
        };
        let Fill::Linear { p1, p2, .. } = fill.rotated(PI) else {
            panic!("rotation changed the fill kind");
        };
        assert!((p1.x - 1.0).abs() < 1e-9 && (p1.y - 0.5).abs() < 1e-9);
        assert!(p2.x.abs() < 1e-9 && (p2.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_moves_radial_center() {
        let fill = Fill::Radial {
            center: Point::new(0.2, 0.3),
            radius: 0.4,
            inner: Color::TRANSPARENT,
            outer: Color::TRANSPARENT,
        };
        let Fill::Radial { center, radius, .. } = fill.rotated(PI) else {
            panic!("rotation changed the fill kind");
        };
        assert!((center.x - 0.8).abs() < 1e-9 && (center.y - 0.7).abs() < 1e-9);
        assert_eq!(radius, 0.4);

        let Fill::Radial { center, .. } = fill.rotated(PI / 2.0) else {
            panic!("rotation changed the fill kind");
        };
        // Quarter turn about the box center: (x, y) -> (1 - y, x).
        assert!((center.x - 0.7).abs() < 1e-9 && (center.y - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_solid_ignores_position() {
        let color = Color::from_packed(0x0102_0304);
        let bbox = BoundingBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        let fill = Fill::Solid(color).rotated(1.0);
        assert_eq!(fill.sample(Point::new(-100.0, 3.0), &bbox), color);
        assert_eq!(fill.sample(Point::new(5.0, 5.0), &bbox), color);
    }
}
