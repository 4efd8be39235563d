//! Endpoint tables for resource types.
//!
//! Each resource declares a table of [`ResourcePath`]s, one per operation it
//! supports. An operation is either one of the CRUD verbs or a named action
//! (`buy`, `cancel`, `rerate`, ...) posted under the resource's id.
//!
//! [`get_path`] selects the most specific path for an operation that can be
//! satisfied by the available ids. [`build_path`] then substitutes the ids
//! into the template, percent-encoding each value so an id can never inject
//! extra path segments.
//!
//! # Example
//!
//! ```rust
//! use easypost::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use easypost::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "pickups/{id}"),
//!     ResourcePath::new(
//!         HttpMethod::Post,
//!         ResourceOperation::Action("buy"),
//!         &["id"],
//!         "pickups/{id}/buy",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Action("buy"), &["id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", "pickup_123");
//! assert_eq!(build_path(path.template, &ids), "pickups/pickup_123/buy");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// What a request does to a resource. Paths are looked up by operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    Find,
    All,
    Create,
    Update,
    Delete,
    /// A named endpoint such as `buy` or `create_and_verify`. Two actions
    /// are the same operation only if their names match.
    Action(&'static str),
}

impl ResourceOperation {
    /// The verb EasyPost normally uses for this operation. A path table may
    /// still override it (address `verify` is a GET).
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::All => HttpMethod::Get,
            Self::Create | Self::Action(_) => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Action(name) => *name,
        }
    }
}

impl std::fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a resource's endpoint table.
///
/// `template` names its placeholders in braces (`pickups/{id}/cancel`) and
/// `ids` lists the same names, which must all be known for the row to
/// apply.
///
/// # Example
///
/// ```rust
/// use easypost::rest::{ResourcePath, ResourceOperation};
/// use easypost::HttpMethod;
///
/// const PICKUP_CANCEL: ResourcePath = ResourcePath::new(
///     HttpMethod::Post,
///     ResourceOperation::Action("cancel"),
///     &["id"],
///     "pickups/{id}/cancel",
/// );
/// assert_eq!(PICKUP_CANCEL.id_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    pub http_method: HttpMethod,
    pub operation: ResourceOperation,
    pub ids: &'static [&'static str],
    pub template: &'static str,
}

impl ResourcePath {
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Whether every id this row needs is among `available_ids`.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Picks the row for `operation` that uses the most of `available_ids`.
///
/// Rows needing an id that is not available are skipped. `None` means the
/// resource has no endpoint for this operation with these ids.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Fills a template's placeholders with percent-encoded ids.
///
/// Encoding keeps an id such as `a/../b` inside a single path segment.
/// Placeholders that have no entry in `ids` stay as they are.
///
/// # Example
///
/// ```rust
/// use easypost::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "adr/../1");
///
/// assert_eq!(build_path("addresses/{id}/verify", &ids), "addresses/adr%2F..%2F1/verify");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
