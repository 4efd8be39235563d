//! REST Resource trait for CRUD operations and instance actions.
//!
//! This module defines the [`RestResource`] trait, which provides a
//! standardized interface for EasyPost resources. Implementors declare their
//! names and path table, and gain `find()`, `all()`, `create()`,
//! `create_in_place()`, `apply()`, and `delete()`.
//!
//! # Merge Semantics
//!
//! Mutating instance operations (`create_in_place`, `apply`) replace every
//! field of the instance with the decoded response. Fields missing from the
//! response become their default. On any error the instance is untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{RestResource, ResourcePath, ResourceOperation};
//! use easypost::HttpMethod;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Parcel {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub id: Option<String>,
//!     pub weight: Option<f64>,
//! }
//!
//! impl RestResource for Parcel {
//!     type CreateParams = Self;
//!     type AllParams = ();
//!
//!     const NAME: &'static str = "Parcel";
//!     const KEY: &'static str = "parcel";
//!     const PLURAL: &'static str = "parcels";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "parcels/{id}"),
//!         ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "parcels"),
//!     ];
//!
//!     fn get_id(&self) -> Option<&str> {
//!         self.id.as_deref()
//!     }
//! }
//!
//! let parcel = Parcel::find(&client, "prcl_123")?;
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{HttpResponse, RestClient};
use crate::rest::{
    build_path, get_path, ResourceError, ResourceOperation, ResourcePath, ResourceResponse,
};

/// A REST resource that can be fetched, created, acted upon, and deleted.
///
/// # Associated Types
///
/// - `CreateParams`: The parameters accepted by static-form `create()`;
///   only the keys the API accepts are representable
/// - `AllParams`: Parameters for `all()` operations (pagination, filters, etc.)
///
/// # Associated Constants
///
/// - `NAME`: The singular resource name used in errors (e.g., "Pickup")
/// - `KEY`: The key request bodies are wrapped under (e.g., "pickup")
/// - `PLURAL`: The key list responses are wrapped under (e.g., "pickups")
/// - `PATHS`: Available paths for different operations
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// Parameters for static-form `create()`.
    type CreateParams: Serialize + Send + Sync;

    /// Parameters for `all()` operations (filtering, pagination, etc.).
    ///
    /// Use `()` if no parameters are needed.
    type AllParams: Serialize + Default + Send + Sync;

    /// The singular name of the resource (e.g., "Pickup").
    const NAME: &'static str;

    /// The key request bodies are wrapped under (e.g., "pickup").
    const KEY: &'static str;

    /// The plural key used by list responses (e.g., "pickups").
    const PLURAL: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Returns the resource's ID if it exists.
    ///
    /// Returns `None` for objects that have not been created server-side.
    fn get_id(&self) -> Option<&str>;

    /// The id, unless it is absent or blank.
    fn existing_id(&self) -> Option<&str> {
        self.get_id().filter(|id| !id.trim().is_empty())
    }

    /// The id an instance `operation` targets.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the id is absent or blank.
    fn require_id(&self, operation: ResourceOperation) -> Result<&str, ResourceError> {
        self.existing_id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: operation.as_str(),
        })
    }

    /// Replaces every field of `self` with `source`.
    fn merge(&mut self, source: Self) {
        *self = source;
    }

    /// Resolves, builds, and sends the request for `operation`.
    ///
    /// Status errors are mapped to semantic [`ResourceError`] variants.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if `id` is blank, since an empty
    /// segment would collapse `pickups/{id}` into the list endpoint.
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// path for `operation`, or any error produced by the request.
    fn send_operation(
        client: &RestClient,
        operation: ResourceOperation,
        id: Option<&str>,
        body: Option<Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, ResourceError> {
        let mut ids: HashMap<&str, &str> = HashMap::new();
        if let Some(id) = id {
            if id.trim().is_empty() {
                return Err(ResourceError::MissingId {
                    resource: Self::NAME,
                    operation: operation.as_str(),
                });
            }
            ids.insert("id", id);
        }

        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, operation, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: operation.as_str(),
            },
        )?;

        let url = build_path(path.template, &ids);

        client
            .send(path.http_method, &url, body, query)
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, id))
    }

    /// Wraps a serializable value under [`KEY`](Self::KEY).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SerializationFailed`] if `value` cannot be
    /// serialized.
    fn wrap_body<P: Serialize + ?Sized>(value: &P) -> Result<Value, ResourceError> {
        let inner = to_json::<Self, P>(value)?;
        let mut body_map = serde_json::Map::new();
        body_map.insert(Self::KEY.to_string(), inner);
        Ok(Value::Object(body_map))
    }

    /// Finds a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if `id` is blank.
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    /// Returns [`ResourceError::Unauthorized`] if the API key is rejected.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pickup = Pickup::find(&client, "pickup_123")?;
    /// println!("Status: {:?}", pickup.status);
    /// ```
    fn find(client: &RestClient, id: &str) -> Result<ResourceResponse<Self>, ResourceError> {
        let response = Self::send_operation(client, ResourceOperation::Find, Some(id), None, None)?;
        ResourceResponse::from_http_response(response, Self::NAME, None)
    }

    /// Lists resources matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource cannot
    /// be listed.
    fn all(
        client: &RestClient,
        params: Option<Self::AllParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let query = params
            .map(|p| serialize_to_query::<Self, _>(&p))
            .transpose()?
            .filter(|q| !q.is_empty());

        let response = Self::send_operation(client, ResourceOperation::All, None, None, query)?;
        ResourceResponse::from_list_response(response, Self::NAME, Self::PLURAL)
    }

    /// Creates a new resource from typed parameters.
    ///
    /// The request body is `{KEY: params}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] if the API rejects the
    /// parameters (422).
    fn create(
        client: &RestClient,
        params: &Self::CreateParams,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let body = Self::wrap_body(params)?;
        let response =
            Self::send_operation(client, ResourceOperation::Create, None, Some(body), None)?;
        ResourceResponse::from_http_response(response, Self::NAME, None)
    }

    /// Creates this object server-side and merges the result into it.
    ///
    /// The writable fields of `self` are sent as `{KEY: self}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ResourceAlreadyCreated`] without sending a
    /// request if `self` already has an id.
    fn create_in_place(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        if let Some(id) = self.existing_id() {
            return Err(ResourceError::ResourceAlreadyCreated {
                resource: Self::NAME,
                id: id.to_string(),
            });
        }

        let body = Self::wrap_body(&*self)?;
        let response =
            Self::send_operation(client, ResourceOperation::Create, None, Some(body), None)?;
        let created = ResourceResponse::<Self>::from_http_response(response, Self::NAME, None)?;

        self.merge(created.into_inner());
        Ok(())
    }

    /// Performs an operation on this object's id and merges the response.
    ///
    /// Used for instance actions like `buy` or `cancel`, and for updates.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending a request if
    /// `self` has no id. Returns [`ResourceError::InvalidResponse`] if the
    /// reply is not a resource with an id; `self` is then left unchanged.
    fn apply(
        &mut self,
        client: &RestClient,
        operation: ResourceOperation,
        body: Option<Value>,
    ) -> Result<(), ResourceError> {
        let id = self.require_id(operation)?;
        let response = Self::send_operation(client, operation, Some(id), body, None)?;
        let updated = ResourceResponse::<Self>::from_http_response(response, Self::NAME, None)?;

        self.merge(updated.into_inner());
        Ok(())
    }

    /// Deletes the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if `self` has no id.
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    fn delete(&self, client: &RestClient) -> Result<(), ResourceError> {
        let id = self.require_id(ResourceOperation::Delete)?;

        Self::send_operation(client, ResourceOperation::Delete, Some(id), None, None)?;
        Ok(())
    }
}

fn to_json<R: RestResource, P: Serialize + ?Sized>(value: &P) -> Result<Value, ResourceError> {
    serde_json::to_value(value).map_err(|e| ResourceError::SerializationFailed {
        resource: R::NAME,
        message: e.to_string(),
    })
}

/// Serializes a params struct to a query parameter map.
fn serialize_to_query<R: RestResource, T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value = to_json::<R, T>(params)?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
