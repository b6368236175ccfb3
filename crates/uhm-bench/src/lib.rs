//! # UHM Bench
//!
//! Scene generators for benchmarking the UHM decoder.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uhm_bench::shape_grid;
//!
//! let bytes = shape_grid(16);
//! let canvas = uhm_format::decode(&bytes, 512, 512)?;
//! ```

use uhm_format::{Color, Fill, Point, SceneBuilder};

const BACKGROUND: Color = Color::from_packed(0xFF20_2020);

fn palette(i: usize) -> Color {
    const COLORS: [u32; 4] = [0xFF33_66CC, 0xFFCC_6633, 0xFF66_CC33, 0xFFCC_33CC];
    Color::from_packed(COLORS[i % COLORS.len()])
}

/// `n` x `n` solid rectangles, circles and ellipses in turn.
pub fn shape_grid(n: usize) -> Vec<u8> {
    let mut b = SceneBuilder::new(BACKGROUND);
    let step = 1.0 / n.max(1) as f32;
    for row in 0..n {
        for col in 0..n {
            let i = row * n + col;
            let x = (col as f32 + 0.5) * step;
            let y = (row as f32 + 0.5) * step;
            let fill = Fill::Solid(palette(i));
            match i % 3 {
                0 => b.rectangle(x, y, step * 0.8, step * 0.8, fill),
                1 => b.circle(x, y, step * 0.4, fill),
                _ => b.ellipse(x, y, step * 0.4, step * 0.25, fill),
            };
        }
    }
    b.to_vec()
}

/// `n` overlapping full-canvas gradient shapes, half of them rotated.
pub fn gradients(n: usize) -> Vec<u8> {
    let mut b = SceneBuilder::new(BACKGROUND);
    for i in 0..n {
        let fill = if i % 2 == 0 {
            Fill::Linear {
                p1: Point::new(0.0, 0.0),
                p2: Point::new(1.0, 1.0),
                from: palette(i),
                to: palette(i + 1),
            }
        } else {
            Fill::Radial {
                center: Point::BOX_CENTER,
                radius: 0.5,
                inner: palette(i),
                outer: palette(i + 2),
            }
        };
        if i % 4 >= 2 {
            b.rotate(0.3 * i as f32);
        }
        b.rectangle(0.5, 0.5, 0.9, 0.9, fill);
    }
    b.to_vec()
}

/// A tiled block of `rows` x `cols` small circles.
pub fn tiled(rows: u16, cols: u16) -> Vec<u8> {
    let mut b = SceneBuilder::new(BACKGROUND);
    let (ox, oy) = (1.0 / cols.max(1) as f32, 1.0 / rows.max(1) as f32);
    b.begin_tiled(ox, oy, rows, cols)
        .circle(ox / 2.0, oy / 2.0, ox.min(oy) * 0.4, Fill::Solid(palette(0)))
        .end_block();
    b.to_vec()
}

/// `depth` patterns, each placing the previous one twice, placed once
/// rotated at the top level.
pub fn nested_patterns(depth: u16) -> Vec<u8> {
    let mut b = SceneBuilder::new(BACKGROUND);
    b.begin_pattern(0)
        .rectangle(0.0, 0.0, 0.02, 0.02, Fill::Solid(palette(0)))
        .end_block();
    for id in 1..=depth {
        let spread = 0.4 / id as f32;
        b.begin_pattern(id)
            .place_pattern(id - 1, -spread, 0.0)
            .rotate(0.5)
            .place_pattern(id - 1, spread, 0.0)
            .end_block();
    }
    b.rotate(0.25).place_pattern(depth, 0.5, 0.5);
    b.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uhm_format::{decode, DecodeOptions};

    #[test]
    fn test_generated_scenes_decode() {
        for bytes in [shape_grid(4), gradients(6), tiled(3, 5)] {
            let canvas = decode(&bytes, 64, 64).unwrap();
            assert!(canvas.pixels().iter().any(|&c| c != BACKGROUND));
        }
        assert!(decode(&nested_patterns(4), 64, 64).is_ok());
    }

    #[test]
    fn test_nested_patterns_respect_depth_limit() {
        let bytes = nested_patterns(12);
        let options = DecodeOptions::default().with_max_nesting_depth(8);
        assert!(uhm_format::decode_with_options(&bytes, 32, 32, &options).is_err());
        assert!(decode(&bytes, 32, 32).is_ok());
    }
}
