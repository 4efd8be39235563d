//! Rate resource implementation.
//!
//! Rates are quotes produced by the API for a shipment or a pickup. They are
//! never created directly; the only endpoint is `rates/{id}`.
//!
//! [`lowest_rate`] picks the cheapest entry of a rate list, and is what
//! `Pickup::lowest_rate` and `Shipment::lowest_rate` delegate to.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::resources::lowest_rate;
//!
//! let rates = shipment.rates.clone().unwrap_or_default();
//! let cheapest = lowest_rate(&rates, &["USPS"], &[], "Shipment")?;
//! println!("{:?} {:?}", cheapest.service, cheapest.rate);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};

/// A price quote for a service from a carrier.
///
/// Monetary amounts are decimal strings, as the API returns them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Rate {
    /// The unique identifier (`rate_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The carrier name (e.g. "USPS", "UPS").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// The service level (e.g. "Priority", "Same-day Pickup").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    // --- Read-only fields (not serialized) ---
    /// "test" or "production".
    #[serde(skip_serializing)]
    pub mode: Option<String>,

    /// The carrier account the rate was quoted through.
    #[serde(skip_serializing)]
    pub carrier_account_id: Option<String>,

    /// The shipment this rate belongs to, if any.
    #[serde(skip_serializing)]
    pub shipment_id: Option<String>,

    /// The pickup this rate belongs to, if any.
    #[serde(skip_serializing)]
    pub pickup_id: Option<String>,

    /// The quoted price.
    #[serde(skip_serializing)]
    pub rate: Option<String>,

    /// Currency of `rate`.
    #[serde(skip_serializing)]
    pub currency: Option<String>,

    /// The retail price.
    #[serde(skip_serializing)]
    pub retail_rate: Option<String>,

    /// Currency of `retail_rate`.
    #[serde(skip_serializing)]
    pub retail_currency: Option<String>,

    /// The list price.
    #[serde(skip_serializing)]
    pub list_rate: Option<String>,

    /// Currency of `list_rate`.
    #[serde(skip_serializing)]
    pub list_currency: Option<String>,

    /// Estimated transit days.
    #[serde(skip_serializing)]
    pub delivery_days: Option<i64>,

    /// Estimated delivery date.
    #[serde(skip_serializing)]
    pub delivery_date: Option<DateTime<Utc>>,

    /// Whether the carrier guarantees `delivery_date`.
    #[serde(skip_serializing)]
    pub delivery_date_guaranteed: Option<bool>,

    /// EasyPost's own transit estimate.
    #[serde(skip_serializing)]
    pub est_delivery_days: Option<i64>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rate {
    /// Returns the quoted price as a number, if it parses.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.rate.as_deref().and_then(|r| r.trim().parse().ok())
    }
}

impl RestResource for Rate {
    type CreateParams = ();
    type AllParams = ();

    const NAME: &'static str = "Rate";
    const KEY: &'static str = "rate";
    const PLURAL: &'static str = "rates";

    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Find,
        &["id"],
        "rates/{id}",
    )];

    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Returns the cheapest rate, optionally restricted to some carriers and
/// services.
///
/// An empty filter slice accepts every value. Filters compare
/// case-insensitively and ignore surrounding whitespace. Rates whose price
/// does not parse are skipped. Ties keep the first rate in list order.
///
/// # Errors
///
/// Returns [`ResourceError::NoMatchingRate`] if no rate passes the filters.
///
/// # Example
///
/// ```rust
/// use easypost::rest::resources::{lowest_rate, Rate};
///
/// let rates = vec![
///     Rate { carrier: Some("UPS".into()), rate: Some("12.50".into()), ..Default::default() },
///     Rate { carrier: Some("USPS".into()), rate: Some("7.10".into()), ..Default::default() },
/// ];
///
/// let cheapest = lowest_rate(&rates, &["ups"], &[], "Shipment").unwrap();
/// assert_eq!(cheapest.rate.as_deref(), Some("12.50"));
/// ```
pub fn lowest_rate<'a>(
    rates: &'a [Rate],
    carriers: &[&str],
    services: &[&str],
    resource: &'static str,
) -> Result<&'a Rate, ResourceError> {
    let mut best: Option<(&Rate, f64)> = None;

    for rate in rates {
        if !matches_filter(rate.carrier.as_deref(), carriers)
            || !matches_filter(rate.service.as_deref(), services)
        {
            continue;
        }
        let Some(amount) = rate.amount() else {
            continue;
        };
        if best.map_or(true, |(_, lowest)| amount < lowest) {
            best = Some((rate, amount));
        }
    }

    best.map(|(rate, _)| rate)
        .ok_or(ResourceError::NoMatchingRate { resource })
}

fn matches_filter(value: Option<&str>, allowed: &[&str]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    value.is_some_and(|v| {
        let v = v.trim();
        allowed.iter().any(|a| a.trim().eq_ignore_ascii_case(v))
    })
}
