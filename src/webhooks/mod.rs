//! Webhook verification for EasyPost event deliveries.
//!
//! EasyPost posts [`Event`]s to the webhook URLs configured on the account.
//! When the webhook has a secret, every delivery is signed; verify it before
//! trusting the payload:
//!
//! ```rust
//! use easypost::webhooks::{compute_signature, verify_webhook, WebhookError, WebhookRequest};
//!
//! let body = br#"{"id": "evt_1", "description": "batch.updated", "result": {}}"#;
//! let headers = [("X-Hmac-Signature", compute_signature(body, "secret"))];
//!
//! let request = WebhookRequest::from_headers(
//!     body.to_vec(),
//!     headers.iter().map(|(k, v)| (*k, v.as_str())),
//! );
//!
//! match verify_webhook(&request, "secret") {
//!     Ok(event) => println!("{:?}", event.description),
//!     Err(WebhookError::InvalidSignature) => println!("forged delivery"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are `Send + Sync`.

mod errors;
mod types;
mod verification;

pub use errors::WebhookError;
pub use types::Event;
pub use verification::{
    compute_signature, verify_hmac, verify_webhook, WebhookRequest, HEADER_SIGNATURE,
    SIGNATURE_PREFIX,
};
