//! Shipment resource implementation.
//!
//! A shipment ties together the origin and destination addresses and a
//! parcel. Creating it quotes `rates`; buying one of them produces a
//! `postage_label` and a `tracking_code`.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::{Parcel, Shipment};
//!
//! let mut shipment = Shipment {
//!     to_address: Some(to),
//!     from_address: Some(from),
//!     parcel: Some(Parcel { weight: Some(16.0), ..Default::default() }),
//!     ..Default::default()
//! };
//! shipment.create_in_place(&client)?;
//!
//! let rate = shipment.lowest_rate(&["USPS"], &[])?.clone();
//! shipment.buy(&client, &rate, Some("100.00"))?;
//! println!("Label: {:?}", shipment.postage_label.and_then(|l| l.label_url));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::resources::common::{serialize_refs, ListParams, ObjectRef};
use crate::rest::resources::rate::lowest_rate;
use crate::rest::resources::{Address, CarrierAccount, Rate};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};

/// The package being shipped. Dimensions are inches, weight is ounces.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Parcel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Weight in ounces; always required by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// A carrier packaging type (e.g. "FlatRateEnvelope"), instead of dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_package: Option<String>,

    // --- Read-only fields (not serialized) ---
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The label produced by buying a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PostageLabel {
    pub id: Option<String>,
    pub label_url: Option<String>,
    pub label_file_type: Option<String>,
    pub label_pdf_url: Option<String>,
    pub label_zpl_url: Option<String>,
    pub label_epl2_url: Option<String>,
    pub label_resolution: Option<i64>,
    pub label_size: Option<String>,
    pub label_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A carrier message attached to a shipment (usually a failed quote).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShipmentMessage {
    pub carrier: Option<String>,
    pub carrier_account_id: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub message: Option<String>,
}

/// A shipment.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Shipment {
    /// The unique identifier (`shp_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<Parcel>,

    /// Carrier accounts to quote from; serialized as id references.
    #[serde(
        serialize_with = "serialize_refs",
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_accounts: Option<Vec<CarrierAccount>>,

    /// Carrier options such as `label_format` or `delivery_confirmation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_return: Option<bool>,

    // --- Read-only fields (not serialized) ---
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    #[serde(skip_serializing)]
    pub rates: Option<Vec<Rate>>,

    /// The rate that was bought.
    #[serde(skip_serializing)]
    pub selected_rate: Option<Rate>,

    #[serde(skip_serializing)]
    pub postage_label: Option<PostageLabel>,

    #[serde(skip_serializing)]
    pub tracking_code: Option<String>,

    #[serde(skip_serializing)]
    pub status: Option<String>,

    #[serde(skip_serializing)]
    pub messages: Option<Vec<ShipmentMessage>>,

    #[serde(skip_serializing)]
    pub batch_id: Option<String>,

    #[serde(skip_serializing)]
    pub batch_status: Option<String>,

    #[serde(skip_serializing)]
    pub refund_status: Option<String>,

    /// The insured amount.
    #[serde(skip_serializing)]
    pub insurance: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for static-form shipment create.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShipmentCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<Parcel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_accounts: Option<Vec<ObjectRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_return: Option<bool>,
}

/// Parameters for listing shipments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShipmentListParams {
    /// Pagination.
    #[serde(flatten)]
    pub page: ListParams,

    /// Only purchased (`true`) or unpurchased (`false`) shipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,

    /// Include return and child shipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_children: Option<bool>,
}

impl RestResource for Shipment {
    type CreateParams = ShipmentCreateParams;
    type AllParams = ShipmentListParams;

    const NAME: &'static str = "Shipment";
    const KEY: &'static str = "shipment";
    const PLURAL: &'static str = "shipments";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "shipments/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "shipments"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "shipments"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "shipments/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("rerate"),
            &["id"],
            "shipments/{id}/rerate",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("refund"),
            &["id"],
            "shipments/{id}/refund",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("insure"),
            &["id"],
            "shipments/{id}/insure",
        ),
    ];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Shipment {
    /// Buys `rate`, optionally insuring the shipment for `insurance`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending a request if the
    /// shipment or the rate has no id.
    pub fn buy(
        &mut self,
        client: &RestClient,
        rate: &Rate,
        insurance: Option<&str>,
    ) -> Result<(), ResourceError> {
        let rate_ref = ObjectRef::to_resource(rate).ok_or(ResourceError::MissingId {
            resource: Rate::NAME,
            operation: "buy",
        })?;

        let mut body = json!({ "rate": rate_ref });
        if let Some(insurance) = insurance {
            body["insurance"] = json!(insurance);
        }

        self.apply(client, ResourceOperation::Action("buy"), Some(body))
    }

    /// Requests fresh quotes and replaces `rates` with them.
    ///
    /// Only `rates` changes; every other field is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the shipment has no id.
    pub fn regenerate_rates(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        let operation = ResourceOperation::Action("rerate");
        let id = self.require_id(operation)?;
        let response = Self::send_operation(client, operation, Some(id), None, None)?;
        let rates =
            ResourceResponse::<Vec<Rate>>::from_list_response(response, Self::NAME, Rate::PLURAL)?;

        self.rates = Some(rates.into_inner());
        Ok(())
    }

    /// Requests a refund of the purchased label.
    ///
    /// The shipment's `refund_status` reflects the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the shipment has no id.
    pub fn refund(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        self.apply(client, ResourceOperation::Action("refund"), None)
    }

    /// Insures a purchased shipment for `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the shipment has no id.
    pub fn insure(&mut self, client: &RestClient, amount: &str) -> Result<(), ResourceError> {
        let body = json!({ "amount": amount });
        self.apply(client, ResourceOperation::Action("insure"), Some(body))
    }

    /// Returns the cheapest quoted rate. Empty slices mean "any".
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoMatchingRate`] if no rate matches.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, ResourceError> {
        lowest_rate(
            self.rates.as_deref().unwrap_or_default(),
            carriers,
            services,
            Self::NAME,
        )
    }
}
