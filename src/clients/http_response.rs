//! Decoded replies from the API.

use std::collections::HashMap;

/// Response header carrying the EasyPost request identifier.
pub const REQUEST_ID_HEADER: &str = "x-ep-request-uuid";

/// A reply with its body parsed as JSON.
///
/// Header names are lowercased when the response is read, so lookups through
/// [`header`](Self::header) ignore case.
///
/// # Example
///
/// ```rust
/// use easypost::clients::HttpResponse;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ep-request-uuid".to_string(), vec!["5f1c-a3".to_string()]);
///
/// let response = HttpResponse::new(200, headers, json!({"id": "pickup_1"}));
/// assert!(response.is_ok());
/// assert_eq!(response.request_id(), Some("5f1c-a3"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub code: u16,
    /// Every value seen for each header, in arrival order.
    pub headers: HashMap<String, Vec<String>>,
    pub body: serde_json::Value,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Whether the status is in `200..300`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.code, 200..=299)
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// The `X-Ep-Request-Uuid` EasyPost assigns to every request.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }
}
