//! # UHM Common
//!
//! Logging configuration shared by the UHM command-line tools.
//!
//! ## Features
//!
//! - Pretty, compact and JSON output on stderr
//! - `RUST_LOG` style filters, or a level picked from a `-v` count

pub mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
