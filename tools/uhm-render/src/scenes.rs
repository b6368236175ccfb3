//! Built-in demonstration scene.

use std::f32::consts::FRAC_PI_4;

use uhm_format::{Color, Fill, Point, SceneBuilder};

pub const BACKGROUND: Color = Color::from_bytes([0x18, 0x18, 0x18, 0xFF]);
pub const RED: Color = Color::from_bytes([0xFF, 0x00, 0x00, 0xFF]);
pub const GREEN: Color = Color::from_bytes([0x00, 0xFF, 0x00, 0xFF]);
const BLUE: Color = Color::from_bytes([0x20, 0x60, 0xFF, 0xFF]);
const GOLD: Color = Color::from_bytes([0xFF, 0xC0, 0x20, 0xFF]);
const WHITE: Color = Color::from_bytes([0xFF, 0xFF, 0xFF, 0xFF]);

/// Two filled rectangles on a dark background, followed by a gradient
/// ellipse, a rotated radial circle, a tiled row of dots and a rotated
/// placement of a small pattern.
pub fn sample_scene() -> Vec<u8> {
    let mut b = SceneBuilder::new(BACKGROUND);

    b.rectangle(0.25, 0.5, 0.1, 0.3, Fill::Solid(RED))
        .rectangle(0.75, 0.1, 0.25, 0.25, Fill::Solid(GREEN));

    b.ellipse(
        0.5,
        0.5,
        0.12,
        0.08,
        Fill::Linear {
            p1: Point::new(0.0, 0.5),
            p2: Point::new(1.0, 0.5),
            from: BLUE,
            to: GOLD,
        },
    );

    b.rotate(FRAC_PI_4).circle(
        0.75,
        0.5,
        0.08,
        Fill::Radial {
            center: Point::new(0.3, 0.3),
            radius: 0.6,
            inner: WHITE,
            outer: BLUE,
        },
    );

    b.begin_tiled(0.1, 0.0, 1, 8)
        .circle(0.15, 0.9, 0.02, Fill::Solid(GOLD))
        .end_block();

    b.begin_pattern(1)
        .rectangle(0.0, 0.0, 0.06, 0.02, Fill::Solid(WHITE))
        .rectangle(0.05, 0.0, 0.02, 0.06, Fill::Solid(RED))
        .end_block();
    for i in 0..4 {
        b.rotate(i as f32 * FRAC_PI_4).place_pattern(1, 0.2 + 0.15 * i as f32, 0.22);
    }

    b.to_vec()
}
