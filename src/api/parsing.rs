use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::errors::DemoError;

/// Reads the request body, decoding it when API Gateway marked it base64.
pub fn extract_body(request: &ApiGatewayProxyRequest) -> Result<String, DemoError> {
    let Some(body) = request.body.as_deref() else {
        return Err(DemoError::ParseError("Missing body".to_string()));
    };

    if !request.is_base64_encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| DemoError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| DemoError::ParseError(format!("Body is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Option<&str>, is_base64_encoded: bool) -> ApiGatewayProxyRequest {
        let mut request = ApiGatewayProxyRequest::default();
        request.body = body.map(ToString::to_string);
        request.is_base64_encoded = is_base64_encoded;
        request
    }

    #[test]
    fn test_extract_body_plain() {
        let body = extract_body(&request(Some(r#"{"id":"a"}"#), false)).unwrap();
        assert_eq!(body, r#"{"id":"a"}"#);
    }

    #[test]
    fn test_extract_body_decodes_base64() {
        let body = extract_body(&request(Some("eyJpZCI6ImEifQ=="), true)).unwrap();
        assert_eq!(body, r#"{"id":"a"}"#);
    }

    #[test]
    fn test_extract_body_rejects_bad_base64() {
        assert!(matches!(
            extract_body(&request(Some("not base64!"), true)),
            Err(DemoError::ParseError(_))
        ));
    }

    #[test]
    fn test_extract_body_missing() {
        assert!(matches!(
            extract_body(&request(None, false)),
            Err(DemoError::ParseError(_))
        ));
    }
}
