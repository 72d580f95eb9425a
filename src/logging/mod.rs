//! Structured, leveled logging for the queue demo.
//!
//! Log records are shaped by a [`LogFormatter`] strategy and written by a
//! `tracing-subscriber` fmt layer. The Lambda execution context is picked up
//! from the invocation span (see [`LambdaContextLayer`]), so handlers only
//! need to run inside a span carrying `aws_request_id`, `function_name`
//! and `cold_start` fields.

pub mod formatter;
pub mod layer;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::level_filters::LevelFilter;

use crate::core::config::LoggerConfig;

pub use formatter::{
    ErrorAttributes, IconFormatter, LambdaContextAttributes, LogAttributes, LogFormatter,
    StandardFormatter, UnformattedAttributes,
};
pub use layer::{LambdaContextLayer, StructuredFormat};

/// Emits an event at CRITICAL severity.
///
/// `tracing` has no level above ERROR, so this is an ERROR event carrying
/// `log_level = "CRITICAL"`, which [`StructuredFormat`] promotes.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        ::tracing::error!(log_level = "CRITICAL", $($arg)+)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
    Silent,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Silent => "SILENT",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            LogLevel::Debug => "🐛",
            LogLevel::Info => "ℹ️",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "🚨",
            LogLevel::Critical => "🔥",
            LogLevel::Silent => "",
        }
    }

    /// Lowest `tracing` level that passes when this is the configured threshold.
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
            LogLevel::Silent => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" | "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "SILENT" => Ok(LogLevel::Silent),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl From<&tracing::Level> for LogLevel {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// Installs the structured subscriber for the queue demo.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init<F: LogFormatter + 'static>(formatter: F, config: &LoggerConfig) {
    use tracing_subscriber::prelude::*;

    let format = StructuredFormat::new(
        formatter,
        config.service_name.clone(),
        config.aws_region.clone(),
    );
    let fmt_layer = tracing_subscriber::fmt::layer().event_format(format);

    tracing_subscriber::registry()
        .with(config.log_level.level_filter())
        .with(LambdaContextLayer)
        .with(fmt_layer)
        .init();
}
