//! Response builders for API Gateway proxy integrations.

use std::collections::HashMap;

use serde_json::json;

use crate::core::models::ApiResponse;

fn json_response(status_code: u16, body: &serde_json::Value) -> ApiResponse {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    ApiResponse {
        status_code,
        headers,
        body: body.to_string(),
    }
}

/// Returns a response whose JSON body is `{"message": ...}`.
#[must_use]
pub fn message_response(status_code: u16, message: &str) -> ApiResponse {
    json_response(status_code, &json!({ "message": message }))
}

/// Returns a 200 OK response with a `message` body.
#[must_use]
pub fn ok_message(message: &str) -> ApiResponse {
    message_response(200, message)
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> ApiResponse {
    json_response(status_code, &json!({ "error": message }))
}
