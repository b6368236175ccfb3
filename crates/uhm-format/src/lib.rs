//! # UHM Format
//!
//! Decoder and rasterizer for UHM, a compact binary vector graphics format.
//!
//! ## Features
//!
//! - **Shapes**: rectangles, circles and ellipses, optionally rotated
//! - **Fills**: solid colors, linear and radial gradients
//! - **Tiled patterns**: a block of instructions repeated on a grid
//! - **Named patterns**: defined once, placed anywhere with rotation
//! - **Builder**: [`SceneBuilder`] writes documents instruction by instruction
//!
//! ## Architecture
//!
//! ```text
//! decode()
//!    ├── ByteCursor          (bounds-checked little-endian reads)
//!    ├── ParseContext        (pending rotation, pattern registry)
//!    │      └── Instruction tree
//!    │             ├── Rectangle / Circle / Ellipse + Fill
//!    │             └── TiledPattern / PatternDefinition / PatternPlacement
//!    └── DrawContext         (canvas, registry, placement depth)
//!           └── Canvas       (row-major packed colors)
//! ```
//!
//! Colors are 32-bit words whose bytes are kept in wire order. The decoder
//! copies and interpolates channels by position and never reorders them.

pub mod blocks;
pub mod builder;
pub mod canvas;
pub mod color;
pub mod context;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod gradient;
pub mod instruction;
pub mod shapes;

pub use blocks::{PatternDefinition, PatternPlacement, TiledPattern};
pub use builder::SceneBuilder;
pub use canvas::Canvas;
pub use color::Color;
pub use context::{DrawContext, ParseContext, PatternRegistry, PendingRotation};
pub use cursor::ByteCursor;
pub use decoder::{decode, decode_with_options, DecodeOptions, MAGIC};
pub use error::{DecodeError, DecodeResult};
pub use fill::Fill;
pub use geometry::{BoundingBox, Point, Transform};
pub use instruction::{parse_instruction, Instruction};
pub use shapes::{Circle, Ellipse, Rectangle};
