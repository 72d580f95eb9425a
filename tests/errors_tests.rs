use observability_demo::errors::DemoError;
use std::error::Error;

#[test]
fn test_demo_error_implements_error_trait() {
    // Verify DemoError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = DemoError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_demo_error_display() {
    // Verify Display implementation works correctly
    let error = DemoError::AwsError("throttled".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to interact with AWS services: throttled"
    );

    let error = DemoError::HttpStatus {
        status: 418,
        status_text: "I'm a teapot".to_string(),
    };
    assert_eq!(format!("{error}"), "Request failed with status code 418");

    let error = DemoError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_demo_error_from_status_uses_reason_phrase() {
    let err = DemoError::from_status(reqwest::StatusCode::NOT_FOUND);
    match err {
        DemoError::HttpStatus {
            status,
            status_text,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("Unexpected error type: {other:?}"),
    }
}

#[test]
fn test_demo_error_from_conversions() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let demo_err: DemoError = err.into();
    assert!(matches!(demo_err, DemoError::ParseError(_)));

    let err = url::Url::parse("no base").unwrap_err();
    let demo_err: DemoError = err.into();
    assert!(matches!(demo_err, DemoError::ConfigError(_)));
}

#[tokio::test]
async fn test_reqwest_error_without_response_is_transport_error() {
    // An unparsable URL fails inside reqwest before any request is sent
    let err = reqwest::Client::new()
        .get("http://")
        .send()
        .await
        .unwrap_err();
    assert!(err.status().is_none());

    match DemoError::from(err) {
        DemoError::HttpError(message) => assert!(!message.is_empty()),
        other => panic!("Unexpected error type: {other:?}"),
    }
}
