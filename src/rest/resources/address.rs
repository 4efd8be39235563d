//! Address resource implementation.
//!
//! Addresses can be created plainly or created and verified in one call.
//! Verification results are reported in [`Address::verifications`]; a
//! failed verification is data, not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::Address;
//!
//! let params = Address {
//!     street1: Some("417 Montgomery St".to_string()),
//!     city: Some("San Francisco".to_string()),
//!     state: Some("CA".to_string()),
//!     zip: Some("94104".to_string()),
//!     country: Some("US".to_string()),
//!     ..Default::default()
//! };
//!
//! let verified = Address::create_and_verify(&client, &params)?;
//! let delivery = verified.verifications.as_ref().and_then(|v| v.delivery.as_ref());
//! println!("Deliverable: {:?}", delivery.and_then(|d| d.success));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::resources::common::{FieldError, ListParams};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};

/// A physical address.
///
/// Used on its own and embedded in pickups and shipments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
    /// The unique identifier (`adr_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name of the person at the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// First street line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,

    /// Second street line (suite, unit, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether this is a residential address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residential: Option<bool>,

    /// Carrier facility code, for hold-at-location deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_facility: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_tax_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_tax_id: Option<String>,

    // --- Read-only fields (not serialized) ---
    /// "test" or "production".
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    /// Verification results, present after a verifying call.
    #[serde(skip_serializing)]
    pub verifications: Option<Verifications>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The verification checks run against an address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Verifications {
    /// Deliverability check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Verification>,

    /// ZIP+4 lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip4: Option<Verification>,
}

/// The outcome of one verification check.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Per-field problems found by the check.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,

    /// Extra data such as coordinates and time zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RestResource for Address {
    type CreateParams = Self;
    type AllParams = ListParams;

    const NAME: &'static str = "Address";
    const KEY: &'static str = "address";
    const PLURAL: &'static str = "addresses";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "addresses/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "addresses"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "addresses"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("create_and_verify"),
            &[],
            "addresses/create_and_verify",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Action("verify"),
            &["id"],
            "addresses/{id}/verify",
        ),
    ];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Address {
    /// Creates an address and verifies it in the same call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] if the API rejects the
    /// address, or [`ResourceError::InvalidResponse`] if the response is not
    /// wrapped under `"address"`.
    pub fn create_and_verify(
        client: &RestClient,
        params: &Self,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let body = Self::wrap_body(params)?;
        let response = Self::send_operation(
            client,
            ResourceOperation::Action("create_and_verify"),
            None,
            Some(body),
            None,
        )?;
        ResourceResponse::from_http_response(response, Self::NAME, Some(Self::KEY))
    }

    /// Verifies this existing address and merges the result into it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending a request if the
    /// address has not been created yet.
    pub fn verify(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        let operation = ResourceOperation::Action("verify");
        let id = self.require_id(operation)?;
        let response = Self::send_operation(client, operation, Some(id), None, None)?;
        let verified =
            ResourceResponse::<Self>::from_http_response(response, Self::NAME, Some(Self::KEY))?;

        self.merge(verified.into_inner());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;
    use serde_json::json;

    #[test]
    fn test_address_serialization_skips_read_only_fields() {
        let address = Address {
            street1: Some("417 Montgomery St".to_string()),
            city: Some("San Francisco".to_string()),
            mode: Some("test".to_string()),
            verifications: Some(Verifications::default()),
            ..Default::default()
        };

        let value = serde_json::to_value(&address).unwrap();
        assert_eq!(
            value,
            json!({"street1": "417 Montgomery St", "city": "San Francisco"})
        );
    }

    #[test]
    fn test_address_deserializes_verifications() {
        let address: Address = serde_json::from_value(json!({
            "id": "adr_1",
            "object": "Address",
            "mode": "test",
            "street1": "UNDELIVERABLE ST",
            "verifications": {
                "delivery": {
                    "success": false,
                    "errors": [
                        {"code": "E.ADDRESS.NOT_FOUND", "field": "address", "message": "Address not found", "suggestion": null}
                    ],
                    "details": {}
                },
                "zip4": {"success": true, "errors": []}
            }
        }))
        .unwrap();

        let verifications = address.verifications.unwrap();
        let delivery = verifications.delivery.unwrap();
        assert_eq!(delivery.success, Some(false));
        assert_eq!(delivery.errors.len(), 1);
        assert_eq!(delivery.errors[0].field.as_deref(), Some("address"));
        assert_eq!(verifications.zip4.unwrap().success, Some(true));
    }

    #[test]
    fn test_address_verify_paths() {
        let path = get_path(Address::PATHS, ResourceOperation::Action("verify"), &["id"]).unwrap();
        assert_eq!(path.template, "addresses/{id}/verify");
        assert_eq!(path.http_method, HttpMethod::Get);

        let path =
            get_path(Address::PATHS, ResourceOperation::Action("create_and_verify"), &[]).unwrap();
        assert_eq!(path.template, "addresses/create_and_verify");
        assert_eq!(path.http_method, HttpMethod::Post);
    }
}
