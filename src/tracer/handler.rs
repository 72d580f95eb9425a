//! Tracer Lambda handler.
//!
//! Flow of one invocation:
//! - Resolve the API URL and API key concurrently
//! - GET the three endpoints concurrently and reduce their outcomes
//! - POST one record to the message route
//! - Classify whatever failed into a response; never fail the invocation

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};

use super::fetch::{fetch_all, reduce};
use super::record::{assemble_record, message_url};
use super::response::{classify_error, write_response};
use super::trace::{TraceContext, Tracer};
use crate::clients::{HttpGateway, ParameterSource};
use crate::core::config::TracerConfig;
use crate::core::models::ApiResponse;
use crate::errors::DemoError;
use crate::utils::{redact::redact, time::format_long};

pub struct TracerService<G, P> {
    config: TracerConfig,
    gateway: G,
    parameters: P,
    tracer: Tracer,
}

impl<G, P> TracerService<G, P>
where
    G: HttpGateway,
    P: ParameterSource,
{
    pub fn new(config: TracerConfig, gateway: G, parameters: P) -> Self {
        let tracer = Tracer::new(config.service_name.clone());
        Self {
            config,
            gateway,
            parameters,
            tracer,
        }
    }

    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Lambda entry point for the API Gateway `GET` route.
    pub async fn handle(
        &self,
        event: LambdaEvent<ApiGatewayProxyRequest>,
    ) -> Result<ApiResponse, Error> {
        let (payload, context) = event.into_parts();
        let mut trace = self.tracer.begin(context.xray_trace_id.as_deref());
        let span = info_span!(
            "invocation",
            aws_request_id = %context.request_id,
            function_name = %context.env_config.function_name,
            xray_trace_id = trace.root_trace_id().unwrap_or(""),
        );

        Ok(self.invoke(&payload, &mut trace).instrument(span).await)
    }

    /// Runs one invocation against an already opened trace context.
    pub async fn invoke(
        &self,
        request: &ApiGatewayProxyRequest,
        trace: &mut TraceContext,
    ) -> ApiResponse {
        let event = serde_json::to_value(request).unwrap_or(Value::Null);
        info!(event = %redact(&event), "API Lambda received request");
        info!("🔌 🛠 Tracer demo instrumentation");

        let response = match self.run(trace).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "🛑 Tracer invocation failed");
                classify_error(&e, &self.now())
            }
        };

        trace.capture_response(&response);
        trace.flush();
        response
    }

    async fn run(&self, trace: &mut TraceContext) -> Result<ApiResponse, DemoError> {
        let (api_url, api_key) = self.resolve_configuration().await?;

        let results = fetch_all(&self.gateway, &self.config.endpoints()).await;
        reduce(&results, trace);
        let record = assemble_record(&results, Utc::now().timestamp_millis());

        let target = message_url(&api_url, &self.config.message_path)?;
        let body = serde_json::to_value(&record)?;
        let posted = self
            .gateway
            .post_json(target.as_str(), &api_key, &body)
            .await?;
        info!(status = posted.status, id = ?record.id, "Message persisted");

        Ok(write_response(posted.status, &self.now()))
    }

    async fn resolve_configuration(&self) -> Result<(String, String), DemoError> {
        let key_parameter = self.config.api_key_parameter();
        let (api_url, api_key) = tokio::join!(
            self.parameters
                .get_parameter(&self.config.api_url_parameter, false),
            self.parameters.get_parameter(&key_parameter, true),
        );

        match (api_url?, api_key?) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(DemoError::ConfigError(
                "Failed to get SSM parameter and/or Secrets Manager secret.".to_string(),
            )),
        }
    }

    fn now(&self) -> String {
        format_long(Utc::now(), self.config.time_zone)
    }
}
