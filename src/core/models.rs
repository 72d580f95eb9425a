use std::collections::HashMap;

use aws_lambda_events::event::sqs::SqsMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What gets logged for each received message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMessage {
    pub message_id: String,
    pub body: String,
}

impl From<&SqsMessage> for BatchMessage {
    fn from(record: &SqsMessage) -> Self {
        Self {
            message_id: record.message_id.clone().unwrap_or_default(),
            body: record.body.clone().unwrap_or_default(),
        }
    }
}

/// Record written to the message table, one per tracer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Value,
}

/// Proxy-integration response returned to API Gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// The `message` field of a JSON body, if there is one.
    #[must_use]
    pub fn body_message(&self) -> Option<String> {
        self.body_field("message")
    }

    /// The `error` field of a JSON body, if there is one.
    #[must_use]
    pub fn body_error(&self) -> Option<String> {
        self.body_field("error")
    }

    fn body_field(&self, name: &str) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get(name)?
            .as_str()
            .map(ToString::to_string)
    }
}
