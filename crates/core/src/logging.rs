//! Logging setup
//!
//! Centralized `tracing` subscriber configuration shared by the server and
//! the CLI.

use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{Result, SearchError};

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

fn directive(spec: &str) -> Result<tracing_subscriber::filter::Directive> {
    spec.parse()
        .map_err(|e| SearchError::invalid_config(format!("Invalid log directive '{}': {}", spec, e)))
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = Level::from_str(&config.level).map_err(|e| {
        SearchError::invalid_config(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    let env_filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive(directive("hyper=warn")?)
        .add_directive(directive("reqwest=warn")?);

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SearchError::invalid_config(format!("Failed to initialize logger: {}", e)))?;

    tracing::debug!("Logger initialized with level: {}", config.level);
    Ok(())
}

/// Initialize logger for testing (reduces noise)
pub fn init_test_logger() {
    let config = LoggerConfig {
        level: "warn".to_string(),
        with_timestamps: false,
        ..LoggerConfig::default()
    };

    // Already initialized by another test
    let _ = init_logger(config);
}

/// Create a logger configuration from environment variables
pub fn logger_config_from_env() -> LoggerConfig {
    let flag = |name: &str, default: bool| {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };

    LoggerConfig {
        level: std::env::var("USERSEARCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        json_format: flag("USERSEARCH_LOG_JSON", false),
        with_timestamps: flag("USERSEARCH_LOG_TIMESTAMPS", true),
        with_file_info: flag("USERSEARCH_LOG_FILE_INFO", false),
    }
}
