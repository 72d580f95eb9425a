use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use lambda_runtime::{Error, LambdaEvent};
use tracing::{debug, error, info, info_span, warn};

use crate::core::ColdStart;
use crate::core::config::LoggerConfig;
use crate::core::models::BatchMessage;
use crate::critical;
use crate::errors::DemoError;
use crate::logging::LogFormatter;

pub const SUCCESS_MARKER: char = '✅';
pub const FAILURE_MARKER: char = '❌';

pub struct LoggerService<F> {
    config: LoggerConfig,
    formatter: F,
    cold_start: ColdStart,
}

impl<F: LogFormatter> LoggerService<F> {
    pub fn new(config: LoggerConfig, formatter: F) -> Self {
        Self {
            config,
            formatter,
            cold_start: ColdStart::new(),
        }
    }

    /// Lambda handler for the SQS trigger.
    pub async fn handle(&self, event: LambdaEvent<SqsEvent>) -> Result<String, Error> {
        let (payload, context) = event.into_parts();
        let span = info_span!(
            "invocation",
            aws_request_id = %context.request_id,
            function_name = %context.env_config.function_name,
            cold_start = self.cold_start.take(),
        );

        Ok(span.in_scope(|| self.process(&payload)))
    }

    /// Logs the batch and returns the status line. Never fails: an error is
    /// reported in the returned status.
    pub fn process(&self, event: &SqsEvent) -> String {
        if self.config.log_event {
            info!(
                event = %serde_json::to_string(event).unwrap_or_default(),
                "Lambda invocation event"
            );
        }

        let result = match self.run(&event.records) {
            Ok(count) => format!("{SUCCESS_MARKER} {count} SQS records processed."),
            Err(e) => {
                let details = self.formatter.format_error(&e);
                error!(custom_key = %details.to_json(), "{} with a custom key", e);
                format!("{FAILURE_MARKER} No SQS record processed.")
            }
        };

        if result.starts_with(SUCCESS_MARKER) {
            info!("{}", result);
        } else {
            error!("{}", result);
        }
        result
    }

    fn run(&self, records: &[SqsMessage]) -> Result<usize, DemoError> {
        debug!("This is a debugging message which only shows in staging.");
        info!("Logger utility reporting for duty.");
        warn!("This is a warning.");
        critical!("Something critical happened");

        if self.config.simulate_failure {
            return Err(DemoError::GeneralError("Sample message thrown".to_string()));
        }

        Ok(log_batch(records).len())
    }
}

/// Logs the received messages at debug level and returns what was logged.
pub fn log_batch(records: &[SqsMessage]) -> Vec<BatchMessage> {
    let batch: Vec<BatchMessage> = records.iter().map(BatchMessage::from).collect();
    debug!(
        sqs_events = %serde_json::to_string(&batch).unwrap_or_default(),
        "{} SQS messages received.",
        batch.len()
    );
    batch
}
