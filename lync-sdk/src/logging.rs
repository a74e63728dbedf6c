//! Logging setup for applications built on the SDK
//!
//! The library crates only emit `tracing` events; nothing is printed until
//! an application installs a subscriber, typically through this module.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber; events are dropped
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose stderr output with source locations
    Debug,
}

impl LoggingMode {
    fn default_level(self) -> &'static str {
        match self {
            LoggingMode::Silent => "off",
            LoggingMode::Development => "info",
            LoggingMode::Debug => "debug",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `LYNC_LOG_LEVEL`: filter directive (e.g. `debug`, `lync_client=trace`)
/// - `RUST_LOG`: used when `LYNC_LOG_LEVEL` is not set
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    if mode == LoggingMode::Silent {
        return Ok(());
    }
    let filter = create_env_filter(mode.default_level())?;
    install(mode, filter)
}

/// Initialize logging with an explicit filter directive, ignoring the
/// environment
pub fn init_with_filter(mode: LoggingMode, directive: &str) -> Result<(), LoggingError> {
    if mode == LoggingMode::Silent {
        return Ok(());
    }
    install(mode, parse_filter(directive)?)
}

/// Initialize logging from `LYNC_LOG_MODE` (`silent`, `development` or
/// `debug`). Unset or unknown values mean silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = mode_from_str(std::env::var("LYNC_LOG_MODE").ok().as_deref());
    init_logging(mode)
}

/// Check if a global subscriber has already been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

fn mode_from_str(value: Option<&str>) -> LoggingMode {
    match value.map(str::trim) {
        Some("development") | Some("dev") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    }
}

fn install(mode: LoggingMode, filter: EnvFilter) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let result = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .with(filter)
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .pretty()
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// `LYNC_LOG_LEVEL`, then `RUST_LOG`, then `default_level`
fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = std::env::var("LYNC_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());
    parse_filter(&directive)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}
