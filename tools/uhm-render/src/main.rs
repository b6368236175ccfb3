//! Command-line front end for the UHM decoder.
//!
//! Provides commands for:
//! - Rendering UHM documents to PNG
//! - Writing a built-in sample document
//! - Comparing rendered images against references
//!
//! ## Usage
//!
//! ```bash
//! # Write the sample scene and render it
//! uhm-render sample --output scene.uhm
//! uhm-render render scene.uhm --width 512 --height 512 --output scene.png
//!
//! # Compare two images
//! uhm-render diff expected.png actual.png --output diff.png --report diff.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use uhm_common::{init_logging, LogConfig, LogFormat};
use uhm_format::DecodeOptions;

mod diff;
mod image;
mod render;
mod scenes;

#[derive(Parser)]
#[command(name = "uhm-render")]
#[command(about = "Render, generate and compare UHM vector graphics")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: pretty, compact or json
    #[arg(long, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a UHM document and write it as PNG
    Render {
        /// Input UHM document
        input: PathBuf,
        /// Canvas width in pixels
        #[arg(long, default_value = "512")]
        width: u32,
        /// Canvas height in pixels
        #[arg(long, default_value = "512")]
        height: u32,
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
        /// Apply tighter nesting and canvas limits
        #[arg(long)]
        strict: bool,
        /// Override the maximum nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
        /// Override the draw-operation budget
        #[arg(long)]
        max_draw_ops: Option<u64>,
    },

    /// Write the built-in sample document
    Sample {
        /// Output UHM path
        #[arg(short, long, default_value = "scene.uhm")]
        output: PathBuf,
    },

    /// Compare two PNG images and produce a diff
    Diff {
        /// Expected (reference) image
        expected: PathBuf,
        /// Actual (rendered) image
        actual: PathBuf,
        /// Output diff image path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Per-channel difference threshold (0-255)
        #[arg(short, long, default_value = "0")]
        threshold: u8,
        /// Output JSON report path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format))?;

    match cli.command {
        Commands::Render {
            input,
            width,
            height,
            output,
            strict,
            max_depth,
            max_draw_ops,
        } => {
            let mut options = if strict {
                DecodeOptions::strict()
            } else {
                DecodeOptions::default()
            };
            if let Some(depth) = max_depth {
                options = options.with_max_nesting_depth(depth);
            }
            if let Some(ops) = max_draw_ops {
                options = options.with_max_draw_operations(ops);
            }

            let summary = render::render_file(&input, &output, width, height, &options)?;
            println!(
                "Rendered {} ({} bytes) to {} at {}x{} in {:.2} ms",
                input.display(),
                summary.input_bytes,
                output.display(),
                summary.width,
                summary.height,
                summary.elapsed_ms
            );
        }

        Commands::Sample { output } => {
            let bytes = scenes::sample_scene();
            std::fs::write(&output, &bytes)?;
            info!(path = %output.display(), len = bytes.len(), "Sample scene written");
            println!("Sample scene written to: {}", output.display());
        }

        Commands::Diff {
            expected,
            actual,
            output,
            threshold,
            report,
        } => {
            let result = if let Some(out) = output {
                diff::compare_and_visualize(&expected, &actual, &out, threshold)?
            } else {
                diff::compare_images(&expected, &actual, threshold)?
            };

            println!("Comparison result:");
            println!("  Total pixels: {}", result.total_pixels);
            println!("  Diff pixels:  {} ({:.2}%)", result.diff_pixels, result.diff_percent);
            println!("  Max diff:     {}", result.max_diff);
            println!("  Mean diff:    {:.2}", result.mean_diff);
            println!("  Matches:      {}", result.matches);

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&report_path, json)?;
                println!("Report written to: {}", report_path.display());
            }

            if !result.matches {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
