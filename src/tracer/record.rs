use serde_json::Value;
use url::Url;

use super::fetch::{FetchResults, IDENTIFIER_SLOT, MESSAGE_SLOT, Outcome};
use crate::core::models::MessageRecord;
use crate::errors::DemoError;

/// Builds the record to persist from the settled calls.
///
/// The message is the payload of [`MESSAGE_SLOT`]. The identifier is the
/// `uuid` string of a fulfilled [`IDENTIFIER_SLOT`]; a rejected identifier
/// call stores its failure reason as the id. That fallthrough is a known
/// defect kept on purpose.
#[must_use]
pub fn assemble_record(results: &FetchResults, created_at: i64) -> MessageRecord {
    let message = results
        .get(MESSAGE_SLOT)
        .map_or(Value::Null, Outcome::payload);
    let id = results
        .get(IDENTIFIER_SLOT)
        .and_then(|outcome| match outcome {
            Outcome::Rejected { reason } => Some(reason.clone()),
            Outcome::Fulfilled(response) => response
                .data
                .get("uuid")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        });

    MessageRecord {
        created_at,
        id,
        message,
    }
}

/// Appends the message route to the API base URL.
pub fn message_url(api_url: &str, message_path: &str) -> Result<Url, DemoError> {
    let base = if api_url.ends_with('/') {
        Url::parse(api_url)?
    } else {
        Url::parse(&format!("{api_url}/"))?
    };
    Ok(base.join(message_path.trim_start_matches('/'))?)
}
