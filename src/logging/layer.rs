use std::error::Error;
use std::fmt;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber, span};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use super::LogLevel;
use super::formatter::{LambdaContextAttributes, LogAttributes, LogFormatter, UnformattedAttributes};

/// Captures the Lambda execution context from span fields and stores it in
/// the span's extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambdaContextLayer;

#[derive(Default)]
struct LambdaContextVisitor {
    aws_request_id: Option<String>,
    function_name: Option<String>,
    cold_start: Option<bool>,
}

impl LambdaContextVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "aws_request_id" => self.aws_request_id = Some(value),
            "function_name" => self.function_name = Some(value),
            "cold_start" => self.cold_start = value.parse().ok(),
            _ => {}
        }
    }

    fn into_context(self) -> Option<LambdaContextAttributes> {
        Some(LambdaContextAttributes {
            aws_request_id: self.aws_request_id?,
            function_name: self.function_name.unwrap_or_default(),
            cold_start: self.cold_start.unwrap_or(false),
        })
    }
}

impl Visit for LambdaContextVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "cold_start" {
            self.cold_start = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set_text(field.name(), format!("{value:?}"));
    }
}

impl<S> Layer<S> for LambdaContextLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let mut visitor = LambdaContextVisitor::default();
        attrs.record(&mut visitor);
        let Some(lambda) = visitor.into_context() else {
            return;
        };
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(lambda);
        }
    }
}

/// Fields of a single event, split into the message and everything else.
#[derive(Default)]
struct EventFields {
    message: String,
    level_override: Option<LogLevel>,
    extra: LogAttributes,
}

impl EventFields {
    fn insert(&mut self, name: &str, value: Value) {
        match name {
            "message" => {
                self.message = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
            }
            "log_level" => {
                self.level_override = value.as_str().and_then(|s| s.parse().ok());
            }
            _ => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }
}

// Objects and arrays rendered as JSON text are embedded as JSON.
fn embed(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => Value::String(text),
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field.name(), embed(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field.name(), json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field.name(), json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field.name(), json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field.name(), json!(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.insert(field.name(), json!(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field.name(), embed(format!("{value:?}")));
    }
}

/// `tracing-subscriber` event format that delegates record shaping to a
/// [`LogFormatter`] and writes one JSON object per line.
pub struct StructuredFormat<F> {
    formatter: F,
    service_name: String,
    aws_region: String,
}

impl<F: LogFormatter> StructuredFormat<F> {
    pub fn new(formatter: F, service_name: String, aws_region: String) -> Self {
        Self {
            formatter,
            service_name,
            aws_region,
        }
    }
}

impl<S, N, F> FormatEvent<S, N> for StructuredFormat<F>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    F: LogFormatter,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let log_level = fields
            .level_override
            .unwrap_or_else(|| LogLevel::from(event.metadata().level()));

        // Innermost span carrying a context wins.
        let lambda_context = ctx.event_scope().and_then(|scope| {
            scope.into_iter().find_map(|span| {
                let extensions = span.extensions();
                extensions.get::<LambdaContextAttributes>().cloned()
            })
        });

        let attributes = UnformattedAttributes {
            aws_region: self.aws_region.clone(),
            timestamp: Utc::now(),
            service_name: self.service_name.clone(),
            log_level,
            lambda_context,
            message: fields.message,
        };

        let mut record = self.formatter.format_attributes(attributes);
        for (key, value) in fields.extra {
            record.entry(key).or_insert(value);
        }

        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::IconFormatter;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    fn capture(f: impl FnOnce()) -> Vec<Value> {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let format = StructuredFormat::new(
            IconFormatter,
            "logger-test".to_string(),
            "ca-central-1".to_string(),
        );
        let subscriber = tracing_subscriber::registry().with(LambdaContextLayer).with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(move || writer.clone()),
        );
        tracing::subscriber::with_default(subscriber, f);
        buffer.lines()
    }

    #[test]
    fn test_event_inside_invocation_span_carries_context() {
        let lines = capture(|| {
            let span = tracing::info_span!(
                "invocation",
                aws_request_id = %"req-42",
                function_name = %"demo-logger",
                cold_start = true
            );
            let _guard = span.enter();
            tracing::info!("Logger utility reporting for duty.");
        });

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line["message"], "ℹ️ INFO: Logger utility reporting for duty.");
        assert_eq!(line["serviceName"], "logger-test");
        assert_eq!(line["lambda"]["awsRequestId"], "req-42");
        assert_eq!(line["lambda"]["name"], "demo-logger");
        assert_eq!(line["lambda"]["coldStart"], true);
    }

    #[test]
    fn test_critical_macro_promotes_level() {
        let lines = capture(|| {
            crate::critical!("Something critical happened");
        });
        assert_eq!(lines[0]["logLevel"], "CRITICAL");
        assert_eq!(lines[0]["message"], "🔥 CRITICAL: Something critical happened");
        assert!(lines[0].get("log_level").is_none());
    }

    #[test]
    fn test_extra_fields_are_appended_and_json_is_embedded() {
        let lines = capture(|| {
            tracing::debug!(
                sqs_events = %r#"[{"messageId":"1","body":"hi"}]"#,
                count = 1,
                "1 SQS messages received."
            );
        });
        let line = &lines[0];
        assert_eq!(line["sqs_events"][0]["body"], "hi");
        assert_eq!(line["count"], 1);
        assert!(line.get("lambda").is_none());
    }
}
