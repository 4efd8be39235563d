//! Pickup resource implementation.
//!
//! A pickup schedules a carrier to collect one shipment or a batch from an
//! address within a time window. The lifecycle is:
//!
//! 1. **Create** - the API assigns an id and quotes `pickup_rates`
//! 2. **Buy** - a carrier and service are chosen; status becomes `scheduled`
//!    and a `confirmation` number is assigned
//! 3. **Cancel** - status becomes `canceled`
//!
//! The window (`min_datetime <= max_datetime`) is validated server-side only.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::{ObjectRef, Pickup, PickupCreateParams};
//!
//! let params = PickupCreateParams {
//!     reference: Some("my-first-pickup".to_string()),
//!     min_datetime: Some(window_start),
//!     max_datetime: Some(window_end),
//!     address: Some(address),
//!     shipment: Some(ObjectRef::new("shp_123")),
//!     ..Default::default()
//! };
//!
//! let mut pickup = Pickup::create(&client, &params)?.into_inner();
//! let rate = pickup.lowest_rate(&[], &[])?.clone();
//! pickup.buy(
//!     &client,
//!     rate.carrier.as_deref().unwrap_or_default(),
//!     rate.service.as_deref().unwrap_or_default(),
//! )?;
//! println!("Confirmation: {:?}", pickup.confirmation);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, RestClient};
use crate::rest::resources::common::{serialize_refs, ListParams, ObjectRef};
use crate::rest::resources::rate::lowest_rate;
use crate::rest::resources::{Address, CarrierAccount, Rate};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};

/// The status of a pickup.
///
/// Values this client does not recognize decode to [`PickupStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    /// Created but not purchased.
    Unknown,
    /// Purchased; the carrier will collect within the window.
    Scheduled,
    /// Canceled; also accepts the `cancelled` spelling.
    #[serde(alias = "cancelled")]
    Canceled,
    /// A status this client does not know about.
    #[default]
    #[serde(other)]
    Other,
}

/// A scheduled (or schedulable) carrier pickup.
///
/// Writable fields are serialized for instance-form create; read-only fields
/// are only ever set from responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Pickup {
    /// The unique identifier (`pickup_...`), absent until created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// A user-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Start of the pickup window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_datetime: Option<DateTime<Utc>>,

    /// End of the pickup window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_datetime: Option<DateTime<Utc>>,

    /// Whether the pickup address is the carrier account's address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_account_address: Option<bool>,

    /// Instructions for the driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Where the carrier collects from. Owned by the pickup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Carrier accounts to request rates from, in order.
    ///
    /// Serialized as `{"id": ...}` references.
    #[serde(
        serialize_with = "serialize_refs",
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_accounts: Option<Vec<CarrierAccount>>,

    // --- Read-only fields (not serialized) ---
    /// "test" or "production".
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    #[serde(skip_serializing)]
    pub status: Option<PickupStatus>,

    /// Messages from carriers that could not quote.
    #[serde(skip_serializing)]
    pub messages: Option<Vec<String>>,

    /// The carrier's confirmation number, set once bought.
    #[serde(skip_serializing)]
    pub confirmation: Option<String>,

    /// Quoted rates, in the order the API returned them.
    #[serde(skip_serializing)]
    pub pickup_rates: Option<Vec<Rate>>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for static-form [`Pickup::create`](RestResource::create).
///
/// Exactly the keys the API accepts; the referenced shipment, batch, and
/// carrier accounts are sent by id.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PickupCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_account_address: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_datetime: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_datetime: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_accounts: Option<Vec<ObjectRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// The shipment to collect. Set this or `batch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment: Option<ObjectRef>,

    /// The batch to collect. Set this or `shipment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<ObjectRef>,
}

impl RestResource for Pickup {
    type CreateParams = PickupCreateParams;
    type AllParams = ListParams;

    const NAME: &'static str = "Pickup";
    const KEY: &'static str = "pickup";
    const PLURAL: &'static str = "pickups";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "pickups/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "pickups"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "pickups"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "pickups/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("cancel"),
            &["id"],
            "pickups/{id}/cancel",
        ),
    ];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Pickup {
    /// Purchases the pickup with a carrier and service from `pickup_rates`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending a request if the
    /// pickup has not been created.
    pub fn buy(
        &mut self,
        client: &RestClient,
        carrier: &str,
        service: &str,
    ) -> Result<(), ResourceError> {
        let body = json!({
            "carrier": carrier,
            "service": service,
        });
        self.apply(client, ResourceOperation::Action("buy"), Some(body))
    }

    /// Cancels the pickup.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending a request if the
    /// pickup has not been created.
    pub fn cancel(&mut self, client: &RestClient) -> Result<(), ResourceError> {
        self.apply(client, ResourceOperation::Action("cancel"), None)
    }

    /// Returns the cheapest quoted rate, optionally limited to some carriers
    /// and services. Empty slices mean "any".
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoMatchingRate`] if no rate matches.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, ResourceError> {
        lowest_rate(
            self.pickup_rates.as_deref().unwrap_or_default(),
            carriers,
            services,
            Self::NAME,
        )
    }
}
