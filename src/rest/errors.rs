//! Resource-specific error types for REST API operations.
//!
//! This module contains error types for REST resource operations, extending
//! the base [`RestError`](crate::clients::RestError) with resource-specific
//! semantics like `NotFound` and `ValidationFailed`.
//!
//! # Error Handling
//!
//! HTTP status codes are mapped to semantic error variants:
//!
//! - **401**: [`ResourceError::Unauthorized`] - The API key was rejected
//! - **404**: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **422**: [`ResourceError::ValidationFailed`] - Validation errors from the API
//! - **Other 4xx/5xx**: [`ResourceError::Http`] - Wrapped HTTP error
//!
//! Local preconditions ([`ResourceError::ResourceAlreadyCreated`],
//! [`ResourceError::MissingId`]) are checked before any request is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{RestResource, ResourceError};
//! use easypost::rest::resources::Pickup;
//!
//! match Pickup::find(&client, "pickup_123") {
//!     Ok(pickup) => println!("Status: {:?}", pickup.status),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{resource} with id {id} not found");
//!     }
//!     Err(ResourceError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use crate::clients::{HttpError, HttpResponseError, RestError};
use thiserror::Error;

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use easypost::rest::ResourceError;
/// use std::collections::HashMap;
///
/// let error = ResourceError::NotFound {
///     resource: "Pickup",
///     id: "pickup_123".to_string(),
/// };
/// assert!(error.to_string().contains("Pickup"));
/// assert!(error.to_string().contains("pickup_123"));
///
/// let mut errors = HashMap::new();
/// errors.insert("min_datetime".to_string(), vec!["must be before max_datetime".to_string()]);
/// let error = ResourceError::ValidationFailed {
///     errors,
///     request_id: Some("abc-123".to_string()),
/// };
/// assert!(error.to_string().contains("Validation failed"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Pickup").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The API key was missing or rejected (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// The message returned by the API.
        message: String,
        /// The request ID for debugging (from the `x-ep-request-uuid` header).
        request_id: Option<String>,
    },

    /// Validation failed for the resource (HTTP 422).
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// A map of field names to error messages.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from the `x-ep-request-uuid` header).
        request_id: Option<String>,
    },

    /// Instance-form create was called on an object that already has an id.
    #[error("{resource} already created with id {id}")]
    ResourceAlreadyCreated {
        /// The type name of the resource.
        resource: &'static str,
        /// The id the object already carries.
        id: String,
    },

    /// An instance operation needs an id but the object has none.
    #[error("Cannot {operation} {resource} without an id")]
    MissingId {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "buy", "cancel").
        operation: &'static str,
    },

    /// No valid path matches the provided IDs and operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "delete").
        operation: &'static str,
    },

    /// No rate matched the requested carriers and services.
    #[error("No rates found for {resource} matching the requested carriers and services")]
    NoMatchingRate {
        /// The type name of the resource the rates belong to.
        resource: &'static str,
    },

    /// Request parameters could not be serialized to JSON.
    #[error("Failed to serialize {resource} parameters: {message}")]
    SerializationFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The serializer's error message.
        message: String,
    },

    /// A successful response body could not be decoded.
    #[error("Invalid {resource} response: {message}")]
    InvalidResponse {
        /// The type name of the resource.
        resource: &'static str,
        /// What went wrong while decoding.
        message: String,
        /// The request ID for debugging (from the `x-ep-request-uuid` header).
        request_id: Option<String>,
    },

    /// An HTTP-level error occurred.
    ///
    /// This variant wraps [`HttpError`] for errors that don't map to
    /// a specific resource error type.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a non-2xx response to a semantic variant.
    ///
    /// 401, 404 and 422 get their own variants; every other status stays a
    /// wrapped [`HttpError::Response`].
    ///
    /// ```rust
    /// use easypost::clients::HttpResponseError;
    /// use easypost::rest::ResourceError;
    /// use serde_json::json;
    ///
    /// let response = HttpResponseError::from_body(
    ///     404,
    ///     json!({"error": {"code": "NOT_FOUND", "message": "Not found"}}),
    ///     Some("req-123".to_string()),
    /// );
    /// let error = ResourceError::from_response_error(response, "Pickup", Some("pickup_123"));
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_response_error(
        error: HttpResponseError,
        resource: &'static str,
        id: Option<&str>,
    ) -> Self {
        match error.code {
            401 => Self::Unauthorized {
                message: error.message,
                request_id: error.error_reference,
            },
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            422 => Self::ValidationFailed {
                errors: parse_validation_errors(&error.body),
                request_id: error.error_reference,
            },
            _ => Self::Http(HttpError::Response(error)),
        }
    }

    /// Maps a REST client error, unwrapping HTTP status errors into semantic variants.
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        match error {
            RestError::Http(HttpError::Response(response_error)) => {
                Self::from_response_error(response_error, resource, id)
            }
            other => Self::Rest(other),
        }
    }

    /// Returns the request ID if available.
    ///
    /// Useful for debugging and error reporting.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { request_id, .. }
            | Self::ValidationFailed { request_id, .. }
            | Self::InvalidResponse { request_id, .. } => request_id.as_deref(),
            Self::Http(HttpError::Response(e))
            | Self::Rest(RestError::Http(HttpError::Response(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Parses validation errors from an API response body.
///
/// EasyPost nests field errors inside the error object:
/// ```json
/// {
///   "error": {
///     "code": "PARAMETER.INVALID",
///     "message": "Invalid pickup window",
///     "errors": [{"field": "min_datetime", "message": "must be before max_datetime"}]
///   }
/// }
/// ```
///
/// Errors without a field, and a bare error message when no field errors are
/// present, are collected under `"base"`.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();

    let error = body.get("error");
    let errors = error
        .and_then(|e| e.get("errors"))
        .or_else(|| body.get("errors"));

    match errors {
        Some(serde_json::Value::Array(items)) => {
            for item in items {
                match item {
                    serde_json::Value::Object(entry) => {
                        let field = entry
                            .get("field")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or("base");
                        let message = entry
                            .get("message")
                            .and_then(serde_json::Value::as_str)
                            .map_or_else(|| item.to_string(), ToString::to_string);
                        result.entry(field.to_string()).or_default().push(message);
                    }
                    serde_json::Value::String(s) => {
                        result.entry("base".to_string()).or_default().push(s.clone());
                    }
                    _ => {}
                }
            }
        }
        Some(serde_json::Value::Object(map)) => {
            for (field, messages) in map {
                let msgs: Vec<String> = match messages {
                    serde_json::Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    serde_json::Value::String(s) => vec![s.clone()],
                    _ => vec![messages.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        _ => {}
    }

    if result.is_empty() {
        if let Some(message) = error
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
        {
            result.insert("base".to_string(), vec![message.to_string()]);
        }
    }

    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
