//! HTTP client for EasyPost API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated,
//! blocking requests to the EasyPost API.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiKey, EasyPostConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the EasyPost API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - HTTP Basic authentication with the API key as user name
/// - Mapping non-2xx responses to [`HttpResponseError`]
///
/// Each call blocks the current thread for one round trip. Failed requests
/// are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal blocking reqwest client.
    client: reqwest::blocking::Client,
    /// Base URL (e.g., `https://api.easypost.com/v2`).
    base_url: String,
    /// Key sent as the Basic auth user name.
    api_key: ApiKey,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying TLS client cannot be
    /// initialized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use easypost::{ApiKey, EasyPostConfig};
    /// use easypost::clients::HttpClient;
    ///
    /// let config = EasyPostConfig::builder()
    ///     .api_key(ApiKey::new("EZTK-test").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.base_url(), "https://api.easypost.com/v2");
    /// ```
    pub fn new(config: &EasyPostConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}EasyPost Rust Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            api_key: config.api_key().clone(),
            default_headers,
        })
    }

    /// Returns a client identical to this one but authenticating with `api_key`.
    ///
    /// The connection pool is shared with the original client.
    #[must_use]
    pub fn with_api_key(&self, api_key: ApiKey) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key,
            default_headers: self.default_headers.clone(),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key this client authenticates with.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the EasyPost API.
    ///
    /// A 2xx body that is not valid JSON is returned as a JSON string so the
    /// caller's decoding step reports it. Non-2xx bodies that are not valid
    /// JSON are kept under a `raw_body` key of the error body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}/{}", self.base_url, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        req_builder = req_builder.basic_auth(self.api_key.as_ref(), Some(""));

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending EasyPost request");

        let res = req_builder.send()?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text()?;
        let body = Self::parse_body(code, body_text);

        let response = HttpResponse::new(code, res_headers, body);

        tracing::debug!(
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "Received EasyPost response"
        );

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            status = code,
            path = %request.path,
            request_id = response.request_id().unwrap_or("-"),
            "EasyPost request failed"
        );

        let error_reference = response.request_id().map(String::from);
        Err(HttpError::Response(HttpResponseError::from_body(
            code,
            response.body,
            error_reference,
        )))
    }

    /// Decodes a response body, keeping unparseable text visible to callers.
    ///
    /// An empty body becomes `null`.
    fn parse_body(code: u16, body_text: String) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(&body_text).unwrap_or_else(|_| {
            if (200..=299).contains(&code) {
                serde_json::Value::String(body_text)
            } else {
                serde_json::json!({ "raw_body": body_text })
            }
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
