//! Types shared across EasyPost resources.
//!
//! - [`ObjectRef`]: An `{"id": ...}` reference to another object
//! - [`ListParams`]: Pagination parameters accepted by list endpoints
//! - [`FieldError`]: A field-level error reported inside a resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::rest::RestResource;

/// A reference to an existing EasyPost object.
///
/// Request bodies refer to objects owned elsewhere (carrier accounts,
/// shipments, batches, rates) by id only.
///
/// # Example
///
/// ```rust
/// use easypost::rest::resources::ObjectRef;
///
/// let reference = ObjectRef::new("ca_123");
/// assert_eq!(serde_json::to_value(&reference).unwrap(), serde_json::json!({"id": "ca_123"}));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// The referenced object's id.
    pub id: String,
}

impl ObjectRef {
    /// Creates a reference to the object with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Creates a reference to a resource, or `None` if it has no id yet.
    #[must_use]
    pub fn to_resource<R: RestResource>(resource: &R) -> Option<Self> {
        resource.existing_id().map(Self::new)
    }
}

/// Serializes an optional list of resources as `[{"id": ...}, ...]`.
///
/// Entries without an id are left out.
pub(crate) fn serialize_refs<S, R>(items: &Option<Vec<R>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    R: RestResource,
{
    let refs: Vec<ObjectRef> = items
        .iter()
        .flatten()
        .filter_map(ObjectRef::to_resource)
        .collect();
    refs.serialize(serializer)
}

/// Pagination parameters for list endpoints.
///
/// EasyPost pages backwards from the newest object; pass the id of the last
/// object of a page as `before_id` to fetch the next one.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListParams {
    /// Number of objects per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Only return objects created before this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,

    /// Only return objects created after this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<String>,

    /// Only return objects created at or after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<DateTime<Utc>>,

    /// Only return objects created at or before this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
}

/// A field-level error reported on a resource (e.g. a failed verification).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FieldError {
    /// Machine-readable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The field the error applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// A suggested replacement value, if the API offered one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
