//! Image diff for comparing renders against reference PNGs.
//!
//! Compares two PNG images and produces summary statistics plus an optional
//! visual diff.

use std::path::Path;

use crate::image::{load_png, save_png, ImageError, RgbaImage};

/// Result of comparing two images.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DiffResult {
    /// Total number of pixels compared.
    pub total_pixels: u64,
    /// Number of pixels that differ.
    pub diff_pixels: u64,
    /// Percentage of pixels that differ.
    pub diff_percent: f64,
    /// Maximum per-channel difference found.
    pub max_diff: u8,
    /// Mean per-channel difference.
    pub mean_diff: f64,
    /// Whether the images match within threshold.
    pub matches: bool,
    /// The threshold used for comparison.
    pub threshold: u8,
}

/// Error type for diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("Image dimensions don't match: {0}x{1} vs {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Compare two in-memory images.
///
/// A pixel matches when every channel is within `threshold`. The returned
/// visualization tints matching pixels green and differing ones red, brighter
/// for larger differences.
pub fn diff_images(
    expected: &RgbaImage,
    actual: &RgbaImage,
    threshold: u8,
) -> Result<(DiffResult, RgbaImage), DiffError> {
    if expected.width != actual.width || expected.height != actual.height {
        return Err(DiffError::DimensionMismatch(
            expected.width,
            expected.height,
            actual.width,
            actual.height,
        ));
    }

    let total_pixels = expected.pixel_count();
    let mut diff_pixels = 0u64;
    let mut max_diff = 0u8;
    let mut total_diff = 0u64;
    let mut visual = Vec::with_capacity(expected.data.len());

    for (exp, act) in expected.data.chunks_exact(4).zip(actual.data.chunks_exact(4)) {
        let pixel_max_diff = exp
            .iter()
            .zip(act)
            .map(|(&e, &a)| e.abs_diff(a))
            .inspect(|&d| total_diff += d as u64)
            .max()
            .unwrap_or(0);
        max_diff = max_diff.max(pixel_max_diff);

        if pixel_max_diff <= threshold {
            visual.extend_from_slice(&[act[0] / 2, (act[1] / 2).saturating_add(128), act[2] / 2, 255]);
        } else {
            diff_pixels += 1;
            visual.extend_from_slice(&[pixel_max_diff.saturating_add(128), act[1] / 4, act[2] / 4, 255]);
        }
    }

    let (diff_percent, mean_diff) = if total_pixels == 0 {
        (0.0, 0.0)
    } else {
        (
            diff_pixels as f64 / total_pixels as f64 * 100.0,
            total_diff as f64 / (total_pixels as f64 * 4.0),
        )
    };

    let result = DiffResult {
        total_pixels,
        diff_pixels,
        diff_percent,
        max_diff,
        mean_diff,
        matches: diff_pixels == 0,
        threshold,
    };
    let visual = RgbaImage {
        width: expected.width,
        height: expected.height,
        data: visual,
    };
    Ok((result, visual))
}

/// Compare two PNG files.
pub fn compare_images(
    expected: impl AsRef<Path>,
    actual: impl AsRef<Path>,
    threshold: u8,
) -> Result<DiffResult, DiffError> {
    let (result, _) = diff_images(&load_png(expected)?, &load_png(actual)?, threshold)?;
    Ok(result)
}

/// Compare two PNG files and write the visual diff to `diff_output`.
pub fn compare_and_visualize(
    expected: impl AsRef<Path>,
    actual: impl AsRef<Path>,
    diff_output: impl AsRef<Path>,
    threshold: u8,
) -> Result<DiffResult, DiffError> {
    let (result, visual) = diff_images(&load_png(expected)?, &load_png(actual)?, threshold)?;
    save_png(diff_output, &visual)?;
    Ok(result)
}
