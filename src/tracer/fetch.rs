//! Concurrent fetch-and-reduce.
//!
//! All calls are issued at once and joined with an all-settle barrier: a
//! failing call never cancels the others, and failures are kept as data.

use futures::future::join_all;
use serde_json::Value;
use tracing::{error, info};

use super::trace::TraceContext;
use crate::clients::{FetchedResponse, HttpGateway};
use crate::errors::DemoError;

/// Slot of the call whose payload becomes the stored message.
pub const MESSAGE_SLOT: usize = 0;
/// Slot of the call whose `uuid` becomes the stored identifier.
pub const IDENTIFIER_SLOT: usize = 1;
/// Slot of the call that is expected to fail (`/status/418`).
pub const STATUS_PROBE_SLOT: usize = 2;

/// Metadata key for the reason a call was rejected.
pub const API_FAILURE_REASON_KEY: &str = "apiFailureReason";

/// The settled result of one outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Fulfilled(FetchedResponse),
    Rejected { reason: String },
}

impl Outcome {
    #[must_use]
    pub fn from_result(result: Result<FetchedResponse, DemoError>) -> Self {
        match result {
            Ok(response) => Outcome::Fulfilled(response),
            Err(e) => Outcome::Rejected {
                reason: e.to_string(),
            },
        }
    }

    /// The response payload, or the rejection reason as a JSON string.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Outcome::Fulfilled(response) => response.data.clone(),
            Outcome::Rejected { reason } => Value::String(reason.clone()),
        }
    }
}

/// Outcomes in the order the calls were issued.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchResults(Vec<Outcome>);

impl FetchResults {
    #[must_use]
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self(outcomes)
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Outcome> {
        self.0.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.0.iter()
    }
}

/// Issues a GET to every endpoint concurrently and waits for all of them.
pub async fn fetch_all<G>(gateway: &G, endpoints: &[String]) -> FetchResults
where
    G: HttpGateway + ?Sized,
{
    let calls = endpoints.iter().map(|url| gateway.get(url));
    let settled = join_all(calls).await;
    FetchResults(settled.into_iter().map(Outcome::from_result).collect())
}

/// Logs each outcome and turns it into its payload. Rejections are also
/// recorded on the trace context.
pub fn reduce(results: &FetchResults, trace: &mut TraceContext) -> Vec<Value> {
    results
        .iter()
        .enumerate()
        .map(|(index, outcome)| {
            let call = index + 1;
            match outcome {
                Outcome::Fulfilled(response) => {
                    let pretty = serde_json::to_string_pretty(&response.data).unwrap_or_default();
                    info!(
                        call,
                        content_type = response.content_type.as_deref().unwrap_or(""),
                        status = "fulfilled",
                        response = %pretty,
                        "✅ Result of call {call}"
                    );
                }
                Outcome::Rejected { reason } => {
                    error!(
                        call,
                        status = "rejected",
                        reason = %reason,
                        trace_id = trace.root_trace_id().unwrap_or(""),
                        "🛑 Error of call {call}"
                    );
                    trace.put_metadata(API_FAILURE_REASON_KEY, reason.clone());
                }
            }
            outcome.payload()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fulfilled(data: Value) -> Outcome {
        Outcome::Fulfilled(FetchedResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            data,
        })
    }

    #[test]
    fn test_reduce_passes_payloads_through_in_order() {
        let results = FetchResults::new(vec![
            fulfilled(json!("hi")),
            fulfilled(json!({ "uuid": "abc-123" })),
            fulfilled(json!({})),
        ]);
        let mut trace = TraceContext::new(Some("1-abc".to_string()), "svc".to_string());

        let reduced = reduce(&results, &mut trace);

        assert_eq!(reduced, vec![json!("hi"), json!({ "uuid": "abc-123" }), json!({})]);
        assert_eq!(trace.metadata(API_FAILURE_REASON_KEY), None);
    }

    #[test]
    fn test_reduce_records_rejection_on_trace() {
        let results = FetchResults::new(vec![
            fulfilled(json!("hi")),
            fulfilled(json!({ "uuid": "abc-123" })),
            Outcome::from_result(Err(DemoError::HttpStatus {
                status: 418,
                status_text: "I'm a teapot".to_string(),
            })),
        ]);
        let mut trace = TraceContext::new(None, "svc".to_string());

        let reduced = reduce(&results, &mut trace);

        assert_eq!(reduced[STATUS_PROBE_SLOT], json!("Request failed with status code 418"));
        assert_eq!(
            trace.metadata(API_FAILURE_REASON_KEY),
            Some(&json!("Request failed with status code 418"))
        );
    }
}
