use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{Error, LambdaEvent};
use tracing::{Instrument, error, info, info_span, warn};

use super::dynamo::{MessageStore, parse_message};
use crate::api::helpers::{err_response, ok_message};
use crate::api::parsing::extract_body;
use crate::core::models::ApiResponse;
use crate::errors::DemoError;

pub const SAVED_MESSAGE: &str = "The message was saved successfully";
pub const BAD_INPUT: &str = "Bad input";
pub const INTERNAL_ERROR: &str = "Internal Service Error";

pub struct StoreService<S> {
    store: S,
}

impl<S: MessageStore> StoreService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lambda entry point for the API Gateway `POST` route.
    pub async fn handle(
        &self,
        event: LambdaEvent<ApiGatewayProxyRequest>,
    ) -> Result<ApiResponse, Error> {
        let (payload, context) = event.into_parts();
        let span = info_span!(
            "invocation",
            aws_request_id = %context.request_id,
            function_name = %context.env_config.function_name,
        );
        Ok(self.save(&payload).instrument(span).await)
    }

    /// Validates the request body and writes it. Always returns one of the
    /// fixed 200, 400 or 500 responses.
    pub async fn save(&self, request: &ApiGatewayProxyRequest) -> ApiResponse {
        let message = match extract_body(request).and_then(|body| parse_message(&body)) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Rejecting message");
                return err_response(400, BAD_INPUT);
            }
        };

        match self.store.put_message(&message).await {
            Ok(()) => {
                info!(id = %message.id, created_at = message.created_at, "Message saved");
                ok_message(SAVED_MESSAGE)
            }
            Err(DemoError::ParseError(e)) => {
                warn!(id = %message.id, error = %e, "Store rejected message");
                err_response(400, BAD_INPUT)
            }
            Err(e) => {
                error!(id = %message.id, error = %e, "Failed to save message");
                err_response(500, INTERNAL_ERROR)
            }
        }
    }
}
