//! Configuration types for the EasyPost API client.
//!
//! This module provides the configuration used to construct a
//! [`RestClient`](crate::clients::RestClient).
//!
//! # Overview
//!
//! - [`EasyPostConfig`]: The configuration struct holding all client settings
//! - [`EasyPostConfigBuilder`]: A builder for constructing [`EasyPostConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! There is no process-wide default key. Every client is built from an
//! explicit configuration, and callers using several keys build one client
//! per key (or derive one with
//! [`RestClient::with_api_key`](crate::clients::RestClient::with_api_key)).
//!
//! # Example
//!
//! ```rust
//! use easypost::{ApiKey, EasyPostConfig};
//! use std::time::Duration;
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK-test-key").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.easypost.com/v2");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default transport timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the EasyPost API client.
///
/// # Thread Safety
///
/// `EasyPostConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct EasyPostConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl EasyPostConfig {
    /// Creates a new builder for constructing an `EasyPostConfig`.
    #[must_use]
    pub fn builder() -> EasyPostConfigBuilder {
        EasyPostConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the transport timeout for a single request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify EasyPostConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EasyPostConfig>();
};

/// Builder for constructing [`EasyPostConfig`] instances.
///
/// `api_key` is required.
///
/// # Defaults
///
/// - `base_url`: `https://api.easypost.com/v2`
/// - `timeout`: 60 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct EasyPostConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl EasyPostConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL, e.g. to point at a proxy or a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the transport timeout for a single request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`EasyPostConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    /// Returns [`ConfigError::ZeroTimeout`] if the timeout is zero.
    pub fn build(self) -> Result<EasyPostConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(EasyPostConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
