//! Logging configuration and setup.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Errors from logging setup.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown log format: {0} (expected pretty, compact or json)")]
    UnknownFormat(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level.
    pub level: Level,
    /// Output format.
    pub format: LogFormat,
    /// Include source file location.
    pub include_location: bool,
    /// Include thread names.
    pub include_thread_names: bool,
    /// Include span events (enter, exit).
    pub include_span_events: bool,
    /// Custom filter string (e.g., "uhm_format=trace,uhm_render=info").
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            include_location: false,
            include_thread_names: false,
            include_span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Create a debug configuration.
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            include_location: true,
            include_span_events: true,
            ..Default::default()
        }
    }

    /// Create a trace configuration. Shape rasterization logs at this level.
    pub fn trace() -> Self {
        Self {
            level: Level::TRACE,
            include_location: true,
            include_thread_names: true,
            include_span_events: true,
            ..Default::default()
        }
    }

    /// Create a production configuration.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Map a `-v` count to a configuration: 0 is info, 1 debug, 2+ trace.
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::default(),
            1 => Self::debug(),
            _ => Self::trace(),
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set a custom filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        match self.filter {
            Some(ref custom_filter) => EnvFilter::try_new(custom_filter).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }
}

/// Initialize logging with the given configuration.
///
/// Logs go to stderr so tools can keep stdout for their own output.
pub fn init_logging(config: LogConfig) -> Result<(), LogError> {
    let filter = config.env_filter();

    let span_events = if config.include_span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = match config.format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_names(config.include_thread_names)
                .with_span_events(span_events);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Compact => {
            let fmt_layer = tracing_fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_span_events(span_events);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(span_events);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
    };

    result.map_err(|e| LogError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.include_location);
    }

    #[test]
    fn test_log_config_debug() {
        let config = LogConfig::debug();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_location);
    }

    #[test]
    fn test_log_config_with_filter() {
        let config = LogConfig::default().with_filter("uhm_format=trace");
        assert_eq!(config.filter, Some("uhm_format=trace".to_string()));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5).level, Level::TRACE);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LogError::UnknownFormat(s)) if s == "xml"
        ));
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_second_init_fails() {
        // The first call may race with other tests; only the second must fail.
        let _ = init_logging(LogConfig::default());
        assert!(matches!(
            init_logging(LogConfig::production()),
            Err(LogError::AlreadyInitialized(_))
        ));
    }
}
