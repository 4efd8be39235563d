//! REST Resource infrastructure for the EasyPost API.
//!
//! This module provides the foundational infrastructure for REST resources with:
//!
//! - **[`RestResource`] trait**: A standardized interface for CRUD operations and instance actions
//! - **[`ResourceResponse<T>`]**: A Deref-based wrapper for ergonomic response handling
//! - **Path building**: Per-operation path tables with percent-encoded id substitution
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! Individual resources (Pickup, Shipment, etc.) are implemented in the
//! [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::{ApiKey, EasyPostConfig, RestClient};
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::Pickup;
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK-your-test-key").unwrap())
//!     .build()
//!     .unwrap();
//! let client = RestClient::new(&config)?;
//!
//! let mut pickup = Pickup::find(&client, "pickup_123")?.into_inner();
//! pickup.buy(&client, "UPS", "Same-day Pickup")?;
//! println!("Confirmation: {:?}", pickup.confirmation);
//! ```

mod errors;
mod path;
mod resource;
mod response;

pub mod resources;

pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::RestResource;
pub use response::ResourceResponse;
