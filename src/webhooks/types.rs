//! Webhook event payload.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::WebhookError;

/// An event delivered by an EasyPost webhook.
///
/// `result` holds the object the event is about (a tracker, a batch, ...);
/// decode it with [`Event::result_as`].
///
/// # Example
///
/// ```rust
/// use easypost::rest::resources::Batch;
/// use easypost::webhooks::Event;
///
/// let event: Event = serde_json::from_str(r#"{
///     "id": "evt_1",
///     "description": "batch.updated",
///     "result": {"id": "batch_1", "object": "Batch", "state": "purchased"}
/// }"#).unwrap();
///
/// let batch: Batch = event.result_as().unwrap();
/// assert_eq!(batch.id.as_deref(), Some("batch_1"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Event {
    /// The unique identifier (`evt_...`).
    pub id: Option<String>,

    /// The event type (e.g. "tracker.updated", "batch.created").
    pub description: Option<String>,

    /// "test" or "production".
    pub mode: Option<String>,

    /// Delivery status ("pending", "completed", "failed", ...).
    pub status: Option<String>,

    /// Fields of `result` that changed, with their previous values.
    pub previous_attributes: Option<Value>,

    /// The object the event is about.
    pub result: Option<Value>,

    #[serde(default)]
    pub pending_urls: Vec<String>,

    #[serde(default)]
    pub completed_urls: Vec<String>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Decodes `result` as a typed object.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] if the event has no result or
    /// it does not decode as `T`.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T, WebhookError> {
        let result = self
            .result
            .clone()
            .ok_or_else(|| WebhookError::InvalidPayload {
                message: "event has no result".to_string(),
            })?;

        serde_json::from_value(result).map_err(|e| WebhookError::InvalidPayload {
            message: e.to_string(),
        })
    }
}
