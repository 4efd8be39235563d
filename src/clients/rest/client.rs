use std::collections::HashMap;

use serde_json::Value;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiKey, EasyPostConfig};

/// Blocking client for the EasyPost v2 REST API.
///
/// Paths are relative to the configured base URL; surrounding slashes are
/// ignored, so `"/pickups/"` and `"pickups"` address the same endpoint.
/// Each client authenticates with its own key. Use
/// [`with_api_key`](Self::with_api_key) to act for another account.
///
/// Every method fails with [`RestError::InvalidPath`] when the path is blank
/// and with [`RestError::Http`] when the request cannot be sent or the
/// server replies with a non-2xx status.
///
/// ```rust,no_run
/// use easypost::{ApiKey, EasyPostConfig, RestClient};
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EasyPostConfig::builder()
///     .api_key(ApiKey::new("EZTK-your-test-key")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let pickup = client.get("pickups/pickup_123", None)?;
/// client.post(
///     "pickups/pickup_123/buy",
///     Some(json!({"carrier": "UPS", "service": "Same-day Pickup"})),
///     None,
/// )?;
/// # let _ = pickup;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the TLS backend fails to initialize.
    pub fn new(config: &EasyPostConfig) -> Result<Self, RestError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// A copy of this client that authenticates with `api_key`.
    ///
    /// Both clients share one connection pool.
    #[must_use]
    pub fn with_api_key(&self, api_key: ApiKey) -> Self {
        tracing::debug!("Deriving EasyPost REST client for another API key");
        Self {
            http_client: self.http_client.with_api_key(api_key),
        }
    }

    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        self.http_client.api_key()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http_client.base_url()
    }

    /// # Errors
    ///
    /// See the type-level docs.
    pub fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Get, path, None, query)
    }

    /// `body` may be `None` for actions without parameters, such as
    /// `pickups/{id}/cancel`.
    ///
    /// # Errors
    ///
    /// See the type-level docs.
    pub fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Post, path, body, query)
    }

    /// # Errors
    ///
    /// See the type-level docs.
    pub fn put(
        &self,
        path: &str,
        body: Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Put, path, Some(body), query)
    }

    /// # Errors
    ///
    /// See the type-level docs.
    pub fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Delete, path, None, query)
    }

    /// Sends a request whose method is chosen at runtime.
    ///
    /// An empty query map is dropped rather than sent as a bare `?`.
    ///
    /// # Errors
    ///
    /// See the type-level docs. A PUT without a body is rejected before
    /// anything is sent.
    pub fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let mut builder = HttpRequest::builder(method, trim_path(path)?);

        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(query);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        Ok(self.http_client.request(request)?)
    }
}

fn trim_path(path: &str) -> Result<&str, RestError> {
    match path.trim().trim_matches('/') {
        "" => Err(RestError::InvalidPath {
            path: path.to_string(),
        }),
        trimmed => Ok(trimmed),
    }
}
