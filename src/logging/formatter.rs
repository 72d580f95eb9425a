use std::error::Error;
use std::panic::Location;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::LogLevel;

/// A formatted log record, serialized as one JSON line.
pub type LogAttributes = serde_json::Map<String, Value>;

/// Execution context of the current invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaContextAttributes {
    pub aws_request_id: String,
    pub function_name: String,
    pub cold_start: bool,
}

/// Everything known about a log event before a formatter shapes it.
#[derive(Debug, Clone)]
pub struct UnformattedAttributes {
    pub aws_region: String,
    pub timestamp: DateTime<Utc>,
    pub service_name: String,
    pub log_level: LogLevel,
    pub lambda_context: Option<LambdaContextAttributes>,
    pub message: String,
}

/// Expanded attributes for an error passed alongside a log message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorAttributes {
    pub name: String,
    pub location: String,
    pub message: String,
    pub stack: Vec<String>,
}

impl ErrorAttributes {
    /// JSON text of these attributes, suitable for a `tracing` field.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Strategy that shapes log records.
pub trait LogFormatter: Send + Sync {
    fn format_attributes(&self, attributes: UnformattedAttributes) -> LogAttributes;

    /// Describes an error: its type name, the call site, its message and its
    /// source chain.
    #[track_caller]
    fn format_error(&self, error: &(dyn Error + 'static)) -> ErrorAttributes {
        describe_error(error, Location::caller())
    }
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn describe_error(error: &(dyn Error + 'static), location: &Location<'_>) -> ErrorAttributes {
    let debug_repr = format!("{error:?}");
    let name: String = debug_repr
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    let name = if name.is_empty() {
        "Error".to_string()
    } else {
        name
    };

    let mut stack = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push(cause.to_string());
        source = cause.source();
    }

    debug!(error_name = %name, "Formatting error attributes");

    ErrorAttributes {
        name,
        location: format!("{}:{}", location.file(), location.line()),
        message: error.to_string(),
        stack,
    }
}

/// Prefixes every message with the level's icon and uppercase name, and
/// nests the execution context under `lambda`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconFormatter;

impl LogFormatter for IconFormatter {
    fn format_attributes(&self, attributes: UnformattedAttributes) -> LogAttributes {
        let level = attributes.log_level;
        let mut record = LogAttributes::new();
        record.insert("awsRegion".into(), json!(attributes.aws_region));
        record.insert(
            "timestamp".into(),
            json!(format_timestamp(&attributes.timestamp)),
        );
        record.insert("serviceName".into(), json!(attributes.service_name));
        record.insert("logLevel".into(), json!(level.as_str()));
        if let Some(lambda) = attributes.lambda_context {
            record.insert(
                "lambda".into(),
                json!({
                    "awsRequestId": lambda.aws_request_id,
                    "name": lambda.function_name,
                    "coldStart": lambda.cold_start,
                }),
            );
        }
        record.insert(
            "message".into(),
            json!(format!("{} {}: {}", level.icon(), level, attributes.message)),
        );
        record
    }
}

/// Flat record with the message left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl LogFormatter for StandardFormatter {
    fn format_attributes(&self, attributes: UnformattedAttributes) -> LogAttributes {
        let mut record = LogAttributes::new();
        record.insert("level".into(), json!(attributes.log_level.as_str()));
        record.insert("message".into(), json!(attributes.message));
        record.insert("service".into(), json!(attributes.service_name));
        record.insert(
            "timestamp".into(),
            json!(format_timestamp(&attributes.timestamp)),
        );
        if !attributes.aws_region.is_empty() {
            record.insert("xray_region".into(), json!(attributes.aws_region));
        }
        if let Some(lambda) = attributes.lambda_context {
            record.insert("cold_start".into(), json!(lambda.cold_start));
            record.insert("function_name".into(), json!(lambda.function_name));
            record.insert("function_request_id".into(), json!(lambda.aws_request_id));
        }
        record
    }
}
