//! Response messages and error classification for the tracer.

use crate::api::helpers::message_response;
use crate::core::models::ApiResponse;
use crate::errors::DemoError;

pub const DEFAULT_ERROR_MESSAGE: &str = "This is the default error message.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Failure,
}

/// Human-readable body message, stamped with `now`. A non-empty `http_response`
/// is appended as the reason.
#[must_use]
pub fn body_message(kind: MessageType, now: &str, http_response: &str) -> String {
    let http_response = if http_response.is_empty() {
        String::new()
    } else {
        format!(" The HTTP response was {http_response}.")
    };
    match kind {
        MessageType::Success => {
            format!("Success: the tracer demo was successfully invoked at {now}.{http_response}")
        }
        MessageType::Failure => {
            format!("Failure: the tracer demo failed at {now}.{http_response}")
        }
    }
}

/// Response for a completed write: the write's own status, with the success
/// message only when that status is 200.
#[must_use]
pub fn write_response(status: u16, now: &str) -> ApiResponse {
    let kind = if status == 200 {
        MessageType::Success
    } else {
        MessageType::Failure
    };
    message_response(status, &body_message(kind, now, ""))
}

/// Maps a failure caught at the top of the handler to a response.
///
/// HTTP errors that carry a status keep it and name its reason phrase;
/// transport errors without a response become 500 naming the error; anything
/// else is a 500 with the default message.
#[must_use]
pub fn classify_error(error: &DemoError, now: &str) -> ApiResponse {
    match error {
        DemoError::HttpStatus {
            status,
            status_text,
        } => {
            let shown = if status_text.is_empty() {
                error.to_string()
            } else {
                status_text.clone()
            };
            message_response(*status, &body_message(MessageType::Failure, now, &shown))
        }
        DemoError::HttpError(message) => {
            message_response(500, &body_message(MessageType::Failure, now, message))
        }
        _ => message_response(500, DEFAULT_ERROR_MESSAGE),
    }
}
