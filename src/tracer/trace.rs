//! Per-invocation trace context.
//!
//! Carries the X-Ray root trace id of the current invocation plus the
//! annotations and metadata the handler attaches to it. The segment is
//! emitted as one structured log line when the invocation finishes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::core::ColdStart;

/// Environment variable the Lambda runtime sets to the current trace header.
pub const TRACE_HEADER_ENV: &str = "_X_AMZN_TRACE_ID";

/// Extracts the `Root=` id from an `X-Amzn-Trace-Id` style header.
#[must_use]
pub fn parse_root_trace_id(header: &str) -> Option<String> {
    static ROOT_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:^|;)\s*Root=([^;\s]+)").expect("static regex compile"));

    ROOT_RE
        .captures(header)
        .map(|cap| cap[1].to_string())
}

/// Builds a [`TraceContext`] for each invocation.
#[derive(Debug)]
pub struct Tracer {
    service_name: String,
    cold_start: ColdStart,
}

impl Tracer {
    #[must_use]
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            cold_start: ColdStart::new(),
        }
    }

    /// Opens the trace context of an invocation. Falls back to the runtime's
    /// trace header environment variable when no header is given.
    pub fn begin(&self, trace_header: Option<&str>) -> TraceContext {
        let env_header = std::env::var(TRACE_HEADER_ENV).ok();
        let root_trace_id = trace_header
            .or(env_header.as_deref())
            .and_then(parse_root_trace_id);

        let mut trace = TraceContext::new(root_trace_id, self.service_name.clone());
        trace.put_annotation("ColdStart", self.cold_start.take());
        trace.put_annotation("Service", self.service_name.clone());
        trace
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceContext {
    root_trace_id: Option<String>,
    namespace: String,
    annotations: Map<String, Value>,
    metadata: Map<String, Value>,
}

impl TraceContext {
    #[must_use]
    pub fn new(root_trace_id: Option<String>, namespace: String) -> Self {
        Self {
            root_trace_id,
            namespace,
            annotations: Map::new(),
            metadata: Map::new(),
        }
    }

    #[must_use]
    pub fn root_trace_id(&self) -> Option<&str> {
        self.root_trace_id.as_deref()
    }

    pub fn put_annotation(&mut self, key: &str, value: impl Into<Value>) {
        self.annotations.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&Value> {
        self.annotations.get(key)
    }

    /// Stores metadata under the service namespace. A later value for the
    /// same key replaces the earlier one.
    pub fn put_metadata(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn capture_response<T: Serialize>(&mut self, response: &T) {
        let value = serde_json::to_value(response).unwrap_or(Value::Null);
        self.put_metadata("response", value);
    }

    /// Emits the segment as a single log line.
    pub fn flush(&self) {
        let segment = json!({
            "annotations": self.annotations,
            "metadata": { self.namespace.as_str(): self.metadata },
        });
        info!(
            trace_id = self.root_trace_id().unwrap_or(""),
            segment = %segment,
            "Trace segment closed"
        );
    }
}
