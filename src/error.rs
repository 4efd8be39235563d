//! Configuration errors.
//!
//! Every constructor in [`crate::config`] validates eagerly and returns
//! [`ConfigError`] instead of deferring the failure to the first request.

use thiserror::Error;

/// Why a configuration value was rejected.
///
/// ```rust
/// use easypost::{ApiKey, ConfigError};
///
/// assert_eq!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("EasyPost API key is empty; use a test (EZTK...) or production (EZAK...) key")]
    EmptyApiKey,

    /// The URL did not parse or used a scheme other than http/https.
    #[error("'{url}' is not a usable base URL; expected something like https://api.easypost.com/v2")]
    InvalidBaseUrl { url: String },

    #[error("EasyPostConfig requires '{field}'")]
    MissingRequiredField { field: &'static str },

    #[error("Request timeout of zero would fail every request")]
    ZeroTimeout,
}
