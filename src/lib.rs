/// Observability demo - three small AWS Lambda functions that show structured
/// logging and trace metadata in practice.
///
/// The crate builds:
/// 1. A logger Lambda, triggered by SQS, that emits leveled, icon-prefixed
///    structured logs for each batch it receives
/// 2. A tracer Lambda, behind API Gateway, that resolves its configuration from
///    SSM, calls three HTTP endpoints concurrently, persists one record and
///    reports the outcome
/// 3. A store Lambda that serves the `POST` route the tracer persists through,
///    writing each message to DynamoDB
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - SSM Parameter Store (and its Secrets Manager references) for configuration
/// - DynamoDB for the message table
/// - reqwest for outbound HTTP
/// - tracing for logs and trace metadata
///
/// # Example
///
/// ```no_run
/// use observability_demo::core::config::TracerConfig;
/// use observability_demo::tracer::fetch::{fetch_all, reduce};
/// use observability_demo::tracer::record::assemble_record;
/// use observability_demo::tracer::trace::Tracer;
/// use observability_demo::clients::ReqwestGateway;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     observability_demo::setup_logging();
///
///     let config = TracerConfig::from_env()?;
///     let gateway = ReqwestGateway::new(reqwest::Client::new());
///     let tracer = Tracer::new(config.service_name.clone());
///     let mut trace = tracer.begin(None);
///
///     let results = fetch_all(&gateway, &config.endpoints()).await;
///     reduce(&results, &mut trace);
///     let record = assemble_record(&results, chrono::Utc::now().timestamp_millis());
///     println!("{}", serde_json::to_string_pretty(&record)?);
///
///     trace.flush();
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod logger;
pub mod logging;
pub mod store;
pub mod tracer;
pub mod utils;

pub use errors::DemoError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The tracer and store Lambdas call it once at
/// startup; the logger Lambda uses [`logging::init`] instead.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// observability_demo::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
