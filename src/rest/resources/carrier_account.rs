//! Carrier account resource implementation.
//!
//! Carrier accounts hold the credentials EasyPost uses to talk to a carrier
//! on the user's behalf. Listing returns a bare JSON array rather than a
//! wrapped page.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::{CarrierAccount, CarrierAccountParams};
//!
//! let mut account = CarrierAccount::find(&client, "ca_123")?.into_inner();
//! account.update(&client, &CarrierAccountParams {
//!     description: Some("Warehouse UPS".to_string()),
//!     ..Default::default()
//! })?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};

/// A carrier account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CarrierAccount {
    /// The unique identifier (`ca_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The carrier account type (e.g. "UpsAccount").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub carrier_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A user-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Production credentials, keyed by carrier-specific field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<HashMap<String, Value>>,

    /// Test-mode credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_credentials: Option<HashMap<String, Value>>,

    // --- Read-only fields (not serialized) ---
    /// Display name of the carrier.
    #[serde(skip_serializing)]
    pub readable: Option<String>,

    /// Who is billed for labels ("easypost", "carrier", ...).
    #[serde(skip_serializing)]
    pub billing_type: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating or updating a carrier account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CarrierAccountParams {
    /// The carrier account type; required on create.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub carrier_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<HashMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_credentials: Option<HashMap<String, Value>>,
}

impl RestResource for CarrierAccount {
    type CreateParams = CarrierAccountParams;
    type AllParams = ();

    const NAME: &'static str = "CarrierAccount";
    const KEY: &'static str = "carrier_account";
    const PLURAL: &'static str = "carrier_accounts";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "carrier_accounts/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &[],
            "carrier_accounts",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "carrier_accounts",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "carrier_accounts/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "carrier_accounts/{id}",
        ),
    ];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl CarrierAccount {
    /// Updates the account with `params` and merges the result.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the account has no id, or
    /// [`ResourceError::ValidationFailed`] if the API rejects the update.
    pub fn update(
        &mut self,
        client: &RestClient,
        params: &CarrierAccountParams,
    ) -> Result<(), ResourceError> {
        let body = Self::wrap_body(params)?;
        self.apply(client, ResourceOperation::Update, Some(body))
    }
}
