use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to load configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse payload: {0}")]
    ParseError(String),

    /// An outbound call that reached the server and got a non-success status back.
    #[error("Request failed with status code {status}")]
    HttpStatus { status: u16, status_text: String },

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl DemoError {
    /// Builds the status-bearing variant from a response status.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        DemoError::HttpStatus {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl From<reqwest::Error> for DemoError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => DemoError::from_status(status),
            None => DemoError::HttpError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(error: serde_json::Error) -> Self {
        DemoError::ParseError(error.to_string())
    }
}

impl From<url::ParseError> for DemoError {
    fn from(error: url::ParseError) -> Self {
        DemoError::ConfigError(format!("invalid URL: {error}"))
    }
}
