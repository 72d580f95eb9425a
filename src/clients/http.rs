//! Outbound HTTP client module
//!
//! Wraps reqwest behind [`HttpGateway`] so handlers can be exercised without a
//! network. Non-success statuses are errors, the same way the calls are
//! treated downstream.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::errors::DemoError;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// A settled, successful HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Parsed JSON when the body is JSON, otherwise the body as a JSON string.
    pub data: Value,
}

#[async_trait]
pub trait HttpGateway: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResponse, DemoError>;

    /// POSTs `body` as JSON with the `X-API-Key` header set.
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<FetchedResponse, DemoError>;
}

pub struct ReqwestGateway {
    client: Client,
}

impl ReqwestGateway {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn settle(response: reqwest::Response) -> Result<FetchedResponse, DemoError> {
        let status = response.status();
        if !status.is_success() {
            return Err(DemoError::from_status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let text = response.text().await?;

        Ok(FetchedResponse {
            status: status.as_u16(),
            content_type,
            data: parse_body(text),
        })
    }
}

/// JSON bodies become JSON values; anything else is kept as text.
#[must_use]
pub fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get(&self, url: &str) -> Result<FetchedResponse, DemoError> {
        let response = self.client.get(url).send().await?;
        Self::settle(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<FetchedResponse, DemoError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?;
        Self::settle(response).await
    }
}

#[async_trait]
impl<T: HttpGateway + ?Sized> HttpGateway for &T {
    async fn get(&self, url: &str) -> Result<FetchedResponse, DemoError> {
        (**self).get(url).await
    }

    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<FetchedResponse, DemoError> {
        (**self).post_json(url, api_key, body).await
    }
}
