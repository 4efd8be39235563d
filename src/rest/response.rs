//! Response wrapper for REST resource operations.
//!
//! This module provides [`ResourceResponse<T>`], a wrapper that combines
//! resource data with response metadata (the EasyPost request id and, for
//! list operations, the `has_more` pagination flag). The wrapper implements
//! `Deref` for ergonomic access to the inner data.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{RestResource, ResourceResponse};
//! use easypost::rest::resources::Pickup;
//!
//! let response: ResourceResponse<Vec<Pickup>> = Pickup::all(&client, None)?;
//!
//! for pickup in response.iter() {
//!     println!("{:?}: {:?}", pickup.id, pickup.status);
//! }
//!
//! if response.has_more() {
//!     // Fetch the next page with `before_id` set to the last pickup id
//! }
//!
//! let pickups: Vec<Pickup> = response.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::clients::HttpResponse;
use crate::rest::ResourceError;

/// A response from a REST resource operation.
///
/// # Example
///
/// ```rust
/// use easypost::rest::ResourceResponse;
///
/// let response = ResourceResponse::new(
///     vec!["pickup_1", "pickup_2"],
///     true,
///     Some("req-123".to_string()),
/// );
///
/// assert_eq!(response.len(), 2);
/// assert!(response.has_more());
/// assert_eq!(response.request_id(), Some("req-123"));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    has_more: bool,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(data: T, has_more: bool, request_id: Option<String>) -> Self {
        Self {
            data,
            has_more,
            request_id,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns `true` if a list response reported further pages.
    ///
    /// Always `false` for single-resource responses.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns the request ID from the response headers.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Maps the inner data to a new type, preserving metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            has_more: self.has_more,
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes a single resource.
    ///
    /// With `key` set, the resource is read from under that key (as returned
    /// by `addresses/{id}/verify`); otherwise the whole body is the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidResponse`] if the key is missing, if
    /// the data is not an object with a non-blank `id` (an empty 2xx body
    /// included), or if it cannot be deserialized.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
        key: Option<&str>,
    ) -> Result<Self, ResourceError> {
        let request_id = response.request_id().map(ToString::to_string);
        let mut body = response.body;

        let data_value = match key {
            Some(key) => match body.get_mut(key) {
                Some(value) => value.take(),
                None => {
                    return Err(ResourceError::InvalidResponse {
                        resource,
                        message: format!("Missing key '{key}' in response body"),
                        request_id,
                    })
                }
            },
            None => body,
        };

        let has_id = data_value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            let message = if data_value.is_object() {
                "Response object has no id".to_string()
            } else {
                format!("Expected a JSON object, got {}", json_kind(&data_value))
            };
            return Err(ResourceError::InvalidResponse {
                resource,
                message,
                request_id,
            });
        }

        let data = decode(data_value, resource, request_id.as_deref())?;

        Ok(Self {
            data,
            has_more: false,
            request_id,
        })
    }
}

impl<T: DeserializeOwned> ResourceResponse<Vec<T>> {
    /// Decodes a list response.
    ///
    /// Accepts both the wrapped form (`{"<plural>": [...], "has_more": bool}`)
    /// and a bare JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidResponse`] if neither form is present
    /// or the items cannot be deserialized.
    pub fn from_list_response(
        response: HttpResponse,
        resource: &'static str,
        plural: &str,
    ) -> Result<Self, ResourceError> {
        let request_id = response.request_id().map(ToString::to_string);
        let mut body = response.body;

        let has_more = body
            .get("has_more")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        let items = if body.is_array() {
            body
        } else if let Some(items) = body.get_mut(plural) {
            items.take()
        } else {
            return Err(ResourceError::InvalidResponse {
                resource,
                message: format!("Missing key '{plural}' in response body"),
                request_id,
            });
        };

        let data = decode(items, resource, request_id.as_deref())?;

        Ok(Self {
            data,
            has_more,
            request_id,
        })
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "an empty body",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "text",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn decode<T: DeserializeOwned>(
    value: serde_json::Value,
    resource: &'static str,
    request_id: Option<&str>,
) -> Result<T, ResourceError> {
    serde_json::from_value(value).map_err(|e| ResourceError::InvalidResponse {
        resource,
        message: format!("Failed to deserialize: {e}"),
        request_id: request_id.map(ToString::to_string),
    })
}

/// Provides transparent access to the inner data.
impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
