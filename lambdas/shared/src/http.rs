//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::Error;

pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", CONTENT_TYPE_JSON)
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;
    Ok(response)
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorBody { error: message.into() })
}

/// Translate a handler error into its controlled response.
pub fn error_to_response(err: &Error) -> Result<Response<Body>, lambda_http::Error> {
    error_response(err.status_code(), err.public_message())
}

/// Relay a raw payload with an explicit content type.
///
/// UTF-8 payloads go out as text; anything else is passed through as binary so
/// no bytes are altered.
pub fn raw_response(
    status: u16,
    content_type: &str,
    body: Vec<u8>,
) -> Result<Response<Body>, lambda_http::Error> {
    let body = match String::from_utf8(body) {
        Ok(text) => Body::Text(text),
        Err(e) => Body::Binary(e.into_bytes()),
    };

    let response = Response::builder()
        .status(status)
        .header("content-type", content_type)
        .body(body)
        .map_err(Box::new)?;
    Ok(response)
}

/// Create an XML response carrying `body` verbatim.
pub fn xml_response(status: u16, body: Vec<u8>) -> Result<Response<Body>, lambda_http::Error> {
    raw_response(status, CONTENT_TYPE_XML, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = error_response(500, "Error fetching data").unwrap();
        assert_eq!(response.status(), 500);
        assert_eq!(response.headers()["content-type"], CONTENT_TYPE_JSON);
        assert_eq!(response.body().as_ref(), br#"{"error":"Error fetching data"}"#);
    }

    #[test]
    fn test_xml_response_is_verbatim() {
        let xml = b"<schedule season=\"2023\">\n  <week/>\n</schedule>".to_vec();
        let response = xml_response(200, xml.clone()).unwrap();
        assert_eq!(response.headers()["content-type"], CONTENT_TYPE_XML);
        assert!(matches!(response.body(), Body::Text(_)));
        assert_eq!(response.body().as_ref(), xml.as_slice());
    }

    #[test]
    fn test_non_utf8_payload_stays_binary() {
        let bytes = vec![0x3c, 0xff, 0xfe, 0x3e];
        let response = xml_response(200, bytes.clone()).unwrap();
        assert!(matches!(response.body(), Body::Binary(_)));
        assert_eq!(response.body().as_ref(), bytes.as_slice());
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = Error::Validation("Invalid year: abcd".into());
        let response = error_to_response(&err).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(response.body().as_ref(), br#"{"error":"Invalid year: abcd"}"#);
    }
}
