use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use crate::core::models::MessageRecord;
use crate::errors::DemoError;

/// A validated message, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub created_at: i64,
    pub id: String,
    /// Stored as text; non-string JSON is serialized.
    pub message: String,
}

/// Parses and validates a `POST` body of the shape `{createdAt, id, message}`.
pub fn parse_message(body: &str) -> Result<NewMessage, DemoError> {
    let record: MessageRecord = serde_json::from_str(body)?;

    let id = record
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DemoError::ParseError("id is required".to_string()))?;

    let message = match record.message {
        Value::Null => return Err(DemoError::ParseError("message is required".to_string())),
        Value::String(text) => text,
        other => other.to_string(),
    };

    Ok(NewMessage {
        created_at: record.created_at,
        id,
        message,
    })
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Writes one message. A rejected item is reported as
    /// [`DemoError::ParseError`], any other failure as [`DemoError::AwsError`].
    async fn put_message(&self, message: &NewMessage) -> Result<(), DemoError>;
}

pub struct DynamoMessageStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoMessageStore {
    #[must_use]
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl MessageStore for DynamoMessageStore {
    async fn put_message(&self, message: &NewMessage) -> Result<(), DemoError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("createdAt", AttributeValue::N(message.created_at.to_string()))
            .item("id", AttributeValue::S(message.id.clone()))
            .item("message", AttributeValue::S(message.message.clone()))
            .send()
            .await
            .map_err(|e| {
                let code = e
                    .as_service_error()
                    .and_then(|se| se.code())
                    .unwrap_or_default()
                    .to_string();
                if code == "ValidationException" {
                    DemoError::ParseError(format!("dynamodb put_item: {}", DisplayErrorContext(&e)))
                } else {
                    DemoError::AwsError(format!("dynamodb put_item: {}", DisplayErrorContext(&e)))
                }
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_accepts_string_message() {
        let msg = parse_message(r#"{"createdAt":1760000000000,"id":"abc-123","message":"hi"}"#).unwrap();
        assert_eq!(
            msg,
            NewMessage {
                created_at: 1_760_000_000_000,
                id: "abc-123".to_string(),
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_message_serializes_structured_message() {
        let msg = parse_message(r#"{"createdAt":1,"id":"a","message":{"k":1}}"#).unwrap();
        assert_eq!(msg.message, r#"{"k":1}"#);
    }

    #[test]
    fn test_parse_message_requires_id_and_message() {
        assert!(parse_message(r#"{"createdAt":1,"message":"hi"}"#).is_err());
        assert!(parse_message(r#"{"createdAt":1,"id":" ","message":"hi"}"#).is_err());
        assert!(parse_message(r#"{"createdAt":1,"id":"a"}"#).is_err());
        assert!(parse_message(r#"{"id":"a","message":"hi"}"#).is_err());
        assert!(parse_message("not json").is_err());
    }
}
