//! # EasyPost API Rust Client
//!
//! A Rust client for the EasyPost shipping API, mapping remote resources
//! onto typed structs with blocking request/response operations.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EasyPostConfig`] and [`EasyPostConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - A blocking HTTP client with HTTP Basic authentication
//! - The [`RestResource`] trait with find/all/create/delete and instance actions
//! - Resources: pickups, addresses, carrier accounts, rates, shipments, batches
//! - Webhook signature verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use easypost::{ApiKey, EasyPostConfig};
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK-your-test-key").unwrap())
//!     .user_agent_prefix("my-shipping-app/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Scheduling a Pickup
//!
//! ```rust,ignore
//! use easypost::{RestClient, RestResource};
//! use easypost::rest::resources::{ObjectRef, Pickup, PickupCreateParams, PickupStatus};
//!
//! let client = RestClient::new(&config)?;
//!
//! let mut pickup = Pickup::create(&client, &PickupCreateParams {
//!     shipment: Some(ObjectRef::new("shp_123")),
//!     address: Some(address),
//!     min_datetime: Some(window_start),
//!     max_datetime: Some(window_end),
//!     ..Default::default()
//! })?.into_inner();
//!
//! pickup.buy(&client, "UPS", "Same-day Pickup")?;
//! assert_eq!(pickup.status, Some(PickupStatus::Scheduled));
//! ```
//!
//! ## Multiple API Keys
//!
//! There is no global API key. Build a client per key, or derive one that
//! shares the connection pool:
//!
//! ```rust,ignore
//! let production = client.with_api_key(ApiKey::new("EZAK-production-key")?);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Blocking**: Each operation is one synchronous HTTP round trip
//!
//! ## Logging
//!
//! Requests and responses are logged with [`tracing`](https://docs.rs/tracing)
//! at `debug` level, and non-2xx responses at `warn`. The crate installs no
//! subscriber.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, EasyPostConfig, EasyPostConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RestClient, RestError,
};

// Re-export REST resource types
pub use rest::resources::{
    Address, Batch, CarrierAccount, ListParams, ObjectRef, Pickup, PickupCreateParams,
    PickupStatus, Rate, Shipment,
};
pub use rest::{ResourceError, ResourceResponse, RestResource};
