//! Batch resource implementation.
//!
//! Batches group shipments so they can be bought, labelled and manifested
//! (scan form) together. Most batch actions are asynchronous server-side:
//! the returned batch reports the new `state` and later polling shows the
//! result.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::{Batch, BatchCreateParams, ObjectRef};
//!
//! let mut batch = Batch::create(&client, &BatchCreateParams {
//!     shipments: Some(vec![ObjectRef::new("shp_1"), ObjectRef::new("shp_2")]),
//!     reference: Some("evening-run".to_string()),
//! })?.into_inner();
//!
//! batch.buy(&client)?;
//! batch.label(&client, "PDF")?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, RestClient};
use crate::rest::resources::common::{ListParams, ObjectRef};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};

/// The processing state of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Creating,
    CreationFailed,
    Created,
    Purchasing,
    PurchaseFailed,
    Purchased,
    LabelGenerating,
    LabelGenerated,
    /// A state this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A shipment's entry in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchShipment {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub tracking_code: Option<String>,
    /// Per-shipment status within the batch (e.g. "postage_purchased").
    pub batch_status: Option<String>,
    /// Why the shipment failed, if it did.
    pub batch_message: Option<String>,
}

/// A scan form (manifest) generated for a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanForm {
    pub id: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
    pub form_url: Option<String>,
    pub form_file_type: Option<String>,
    #[serde(default)]
    pub tracking_codes: Vec<String>,
    pub batch_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A batch of shipments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Batch {
    /// The unique identifier (`batch_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    // --- Read-only fields (not serialized) ---
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    #[serde(skip_serializing)]
    pub state: Option<BatchState>,

    #[serde(skip_serializing)]
    pub num_shipments: Option<u32>,

    #[serde(skip_serializing)]
    pub shipments: Option<Vec<BatchShipment>>,

    /// Shipment counts keyed by batch status.
    #[serde(skip_serializing)]
    pub status: Option<HashMap<String, u32>>,

    /// The combined label, once generated.
    #[serde(skip_serializing)]
    pub label_url: Option<String>,

    #[serde(skip_serializing)]
    pub scan_form: Option<ScanForm>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchCreateParams {
    /// Existing shipments to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipments: Option<Vec<ObjectRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl RestResource for Batch {
    type CreateParams = BatchCreateParams;
    type AllParams = ListParams;

    const NAME: &'static str = "Batch";
    const KEY: &'static str = "batch";
    const PLURAL: &'static str = "batches";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "batches/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "batches"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "batches"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("add_shipments"),
            &["id"],
            "batches/{id}/add_shipments",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("remove_shipments"),
            &["id"],
            "batches/{id}/remove_shipments",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "batches/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("label"),
            &["id"],
            "batches/{id}/label",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("scan_form"),
            &["id"],
            "batches/{id}/scan_form",
        ),
    ];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Batch {
    /// Adds existing shipments to the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the batch has no id.
    pub fn add_shipments(
        &mut self,
        client: &RestClient,
        shipments: &[ObjectRef],
    ) -> Result<(), ResourceError> {
        let body = json!({ "shipments": shipments });
        self.apply(client, ResourceOperation::Action("add_shipments"), Some(body))
    }

    /// Removes shipments from the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the batch has no id.
    pub fn remove_shipments(
        &mut self,
        client: &RestClient,
        shipments: &[ObjectRef],
    ) -> Result<(), ResourceError> {
        let body = json!({ "shipments": shipments });
        self.apply(client, ResourceOperation::Action("remove_shipments"), Some(body))
    }

    /// Buys postage for every shipment in the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the batch has no id.
    pub fn buy(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        self.apply(client, ResourceOperation::Action("buy"), None)
    }

    /// Generates one combined label file ("PDF", "ZPL" or "EPL2").
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the batch has no id.
    pub fn label(&mut self, client: &RestClient, file_format: &str) -> Result<(), ResourceError> {
        let body = json!({ "file_format": file_format });
        self.apply(client, ResourceOperation::Action("label"), Some(body))
    }

    /// Creates a scan form for the batch's shipments.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the batch has no id.
    pub fn create_scan_form(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        self.apply(client, ResourceOperation::Action("scan_form"), None)
    }
}
