//! HTTP-specific error types for the EasyPost API client.
//!
//! This module contains error types for HTTP operations, including response
//! errors and request validation failures.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request) {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// EasyPost error bodies have the shape
/// `{"error": {"code": "...", "message": "...", "errors": [...]}}`. The
/// `error_code` and `message` fields are lifted from that object when it is
/// present; the untouched body is kept in `body` for callers that need the
/// field-level details.
///
/// # Example
///
/// ```rust
/// use easypost::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     error_code: Some("NOT_FOUND".to_string()),
///     message: "The requested resource could not be found.".to_string(),
///     error_reference: Some("3c8f0b5e".to_string()),
///     body: serde_json::json!({}),
/// };
///
/// assert_eq!(
///     error.to_string(),
///     "HTTP 404 NOT_FOUND: The requested resource could not be found."
/// );
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code} {}: {message}", .error_code.as_deref().unwrap_or("UNKNOWN"))]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The machine-readable error code (e.g. `PICKUP.NOT_FOUND`), if present.
    pub error_code: Option<String>,
    /// Human-readable error message.
    pub message: String,
    /// Reference ID for error reporting (from the `x-ep-request-uuid` header).
    pub error_reference: Option<String>,
    /// The raw response body.
    pub body: serde_json::Value,
}

impl HttpResponseError {
    /// Builds an error from a status code and the decoded response body.
    #[must_use]
    pub fn from_body(code: u16, body: serde_json::Value, error_reference: Option<String>) -> Self {
        let error = body.get("error");
        let error_code = error
            .and_then(|e| e.get("code"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);
        let message = error
            .and_then(|e| match e {
                serde_json::Value::String(s) => Some(s.clone()),
                _ => e
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string),
            })
            .or_else(|| {
                body.get("raw_body")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string)
            })
            .unwrap_or_else(|| format!("Request failed with status {code}"));

        Self {
            code,
            error_code,
            message,
            error_reference,
            body,
        }
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_extracts_easypost_error_object() {
        let body = json!({
            "error": {
                "code": "PICKUP.NOT_FOUND",
                "message": "The requested pickup could not be found.",
                "errors": []
            }
        });

        let error = HttpResponseError::from_body(404, body, Some("req-1".to_string()));

        assert_eq!(error.code, 404);
        assert_eq!(error.error_code.as_deref(), Some("PICKUP.NOT_FOUND"));
        assert_eq!(error.message, "The requested pickup could not be found.");
        assert_eq!(error.error_reference.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_from_body_accepts_string_error() {
        let error = HttpResponseError::from_body(400, json!({"error": "bad input"}), None);

        assert!(error.error_code.is_none());
        assert_eq!(error.message, "bad input");
        assert_eq!(error.to_string(), "HTTP 400 UNKNOWN: bad input");
    }

    #[test]
    fn test_from_body_falls_back_to_raw_body_then_status() {
        let error = HttpResponseError::from_body(502, json!({"raw_body": "Bad Gateway"}), None);
        assert_eq!(error.message, "Bad Gateway");

        let error = HttpResponseError::from_body(503, json!({}), None);
        assert_eq!(error.message, "Request failed with status 503");
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "PUT".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use PUT without specifying data.");
        assert_eq!(
            InvalidHttpRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error =
            &HttpResponseError::from_body(500, json!({}), None);
        let _ = response_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
        let _ = invalid_error;
    }
}
