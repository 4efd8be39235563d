//! Outgoing request description.
//!
//! An [`HttpRequest`] is a verb, a path relative to the configured base URL,
//! optional query parameters, and an optional JSON body. It is checked with
//! [`HttpRequest::verify`] before [`HttpClient`](crate::clients::HttpClient)
//! sends it.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// The HTTP verbs the EasyPost API uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    /// Creates and instance actions (`buy`, `cancel`, ...).
    Post,
    /// Updates; always carries a body.
    Put,
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of a request body. EasyPost v2 accepts JSON only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Json,
}

impl DataType {
    /// Returns the `Content-Type` header value.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// A request to the EasyPost API.
///
/// # Example
///
/// ```rust
/// use easypost::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let buy = HttpRequest::builder(HttpMethod::Post, "pickups/pickup_123/buy")
///     .json(json!({"carrier": "UPS", "service": "Same-day Pickup"}))
///     .build()
///     .unwrap();
/// assert!(buy.body.is_some());
///
/// // Cancel is a POST with no body
/// let cancel = HttpRequest::builder(HttpMethod::Post, "pickups/pickup_123/cancel")
///     .build()
///     .unwrap();
/// assert!(cancel.body.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub http_method: HttpMethod,
    /// Path relative to the base URL, without a leading slash.
    pub path: String,
    pub body: Option<Value>,
    /// Must be set whenever `body` is.
    pub body_type: Option<DataType>,
    pub query: Option<HashMap<String, String>>,
    /// Headers added on top of the client's defaults.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Starts building a request.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            request: Self {
                http_method: method,
                path: path.into(),
                body: None,
                body_type: None,
                query: None,
                extra_headers: None,
            },
        }
    }

    /// Checks that the body and method agree.
    ///
    /// A POST may have no body; a PUT must have one.
    ///
    /// # Errors
    ///
    /// - [`InvalidHttpRequestError::MissingBodyType`] if a body has no type
    /// - [`InvalidHttpRequestError::MissingBody`] if a PUT has no body
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (&self.body, self.body_type) {
            (Some(_), None) => Err(InvalidHttpRequestError::MissingBodyType),
            (None, _) if self.http_method == HttpMethod::Put => {
                Err(InvalidHttpRequestError::MissingBody {
                    method: self.http_method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.request.body = Some(body.into());
        self.request.body_type = Some(DataType::Json);
        self
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.request.query = Some(query);
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Finishes and verifies the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
