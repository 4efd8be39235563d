//! Transport layer.
//!
//! [`HttpClient`] owns a blocking `reqwest` client configured with the API
//! key, base URL, timeout and `User-Agent` from an
//! [`EasyPostConfig`](crate::EasyPostConfig). It sends one [`HttpRequest`]
//! at a time and turns the reply into an [`HttpResponse`], or into
//! [`HttpError::Response`] when the status is not 2xx. Requests are not
//! retried.
//!
//! Most callers never touch this layer directly: resource types go through
//! [`RestClient`], which adds path normalization on top.
//!
//! ```rust,no_run
//! use easypost::clients::{HttpClient, HttpMethod, HttpRequest};
//! use easypost::{ApiKey, EasyPostConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK-your-test-key")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "pickups/pickup_123").build()?;
//! let response = client.request(request)?;
//! println!("{}", response.body["status"]);
//! # Ok(())
//! # }
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, REQUEST_ID_HEADER};

pub use rest::{RestClient, RestError};
