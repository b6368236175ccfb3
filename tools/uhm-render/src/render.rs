//! Decode UHM files to PNG.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;
use uhm_format::{decode_with_options, DecodeError, DecodeOptions};

use crate::image::{save_png, ImageError, RgbaImage};

/// Error type for rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a successful render.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    pub input_bytes: usize,
    pub elapsed_ms: f64,
}

/// Decode `input` at `width` x `height` and write the result to `output`.
pub fn render_file(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    options: &DecodeOptions,
) -> Result<RenderSummary, RenderError> {
    let bytes = std::fs::read(input)?;
    let start = Instant::now();
    let canvas = decode_with_options(&bytes, width, height, options).map_err(|source| {
        RenderError::Decode {
            path: input.to_path_buf(),
            source,
        }
    })?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    save_png(output, &RgbaImage::from(&canvas))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        width,
        height,
        elapsed_ms,
        "Rendered"
    );

    Ok(RenderSummary {
        width,
        height,
        input_bytes: bytes.len(),
        elapsed_ms,
    })
}
