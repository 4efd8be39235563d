//! Webhook signature verification.
//!
//! EasyPost signs each webhook delivery with HMAC-SHA256 over the raw body,
//! keyed with the webhook's secret, and sends the hex digest in the
//! `X-Hmac-Signature` header as `hmac-sha256-hex=<digest>`.
//!
//! - [`verify_webhook`]: Verifies a request and decodes its [`Event`]
//! - [`verify_hmac`]: Low-level check of a body against a header value
//!
//! # Example
//!
//! ```rust
//! use easypost::webhooks::{compute_signature, verify_webhook, WebhookRequest};
//!
//! let body = br#"{"id": "evt_1", "description": "tracker.updated"}"#;
//! let header = compute_signature(body, "my-webhook-secret");
//!
//! let request = WebhookRequest::new(body.to_vec(), Some(header));
//! let event = verify_webhook(&request, "my-webhook-secret").unwrap();
//! assert_eq!(event.description.as_deref(), Some("tracker.updated"));
//! ```
//!
//! # Security
//!
//! Signature comparison is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::webhooks::{Event, WebhookError};

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Header Constants
// ============================================================================

/// HTTP header carrying the webhook signature.
pub const HEADER_SIGNATURE: &str = "X-Hmac-Signature";

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "hmac-sha256-hex=";

// ============================================================================
// WebhookRequest
// ============================================================================

/// An incoming webhook request.
///
/// The body is kept as raw bytes; the signature covers them exactly.
///
/// # Example
///
/// ```rust
/// use easypost::webhooks::WebhookRequest;
///
/// let request = WebhookRequest::from_headers(
///     b"{}".to_vec(),
///     [("content-type", "application/json"), ("x-hmac-signature", "hmac-sha256-hex=00")],
/// );
/// assert_eq!(request.signature(), Some("hmac-sha256-hex=00"));
/// ```
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    body: Vec<u8>,
    signature: Option<String>,
}

impl WebhookRequest {
    /// Creates a request from its body and `X-Hmac-Signature` value.
    #[must_use]
    pub const fn new(body: Vec<u8>, signature: Option<String>) -> Self {
        Self { body, signature }
    }

    /// Creates a request from its body and headers.
    ///
    /// Header names are matched case-insensitively.
    #[must_use]
    pub fn from_headers<'a, I>(body: Vec<u8>, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let signature = headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(HEADER_SIGNATURE))
            .map(|(_, value)| value.trim().to_string());

        Self { body, signature }
    }

    /// Returns the raw request body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the signature header value, if present.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

// ============================================================================
// Verification Functions
// ============================================================================

/// Computes the signature header value for `body` under `secret`.
///
/// Returns `hmac-sha256-hex=` followed by the lowercase hex digest.
///
/// # Example
///
/// ```rust
/// use easypost::webhooks::compute_signature;
///
/// let signature = compute_signature(b"payload", "secret");
/// assert!(signature.starts_with("hmac-sha256-hex="));
/// assert_eq!(signature.len(), "hmac-sha256-hex=".len() + 64);
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(body: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    let digest = hex::encode(mac.finalize().into_bytes());
    format!("{SIGNATURE_PREFIX}{digest}")
}

/// Returns `true` if `signature` is the valid header value for `body`.
///
/// The hex digest is compared case-insensitively.
///
/// # Example
///
/// ```rust
/// use easypost::webhooks::{compute_signature, verify_hmac};
///
/// let header = compute_signature(b"payload", "secret");
/// assert!(verify_hmac(b"payload", &header, "secret"));
/// assert!(!verify_hmac(b"payload", &header, "other-secret"));
/// ```
#[must_use]
pub fn verify_hmac(body: &[u8], signature: &str, secret: &str) -> bool {
    let expected = compute_signature(body, secret);
    let provided = signature.trim().to_ascii_lowercase();
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Verifies a webhook request and decodes its event.
///
/// # Errors
///
/// - [`WebhookError::MissingSignature`] if the request has no signature
/// - [`WebhookError::InvalidSignature`] if the signature does not match
/// - [`WebhookError::InvalidPayload`] if the authentic body is not an event
pub fn verify_webhook(request: &WebhookRequest, secret: &str) -> Result<Event, WebhookError> {
    let signature = request
        .signature()
        .filter(|s| !s.trim().is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    if !verify_hmac(request.body(), signature, secret) {
        tracing::warn!("Rejected webhook with invalid signature");
        return Err(WebhookError::InvalidSignature);
    }

    serde_json::from_slice(request.body()).map_err(|e| WebhookError::InvalidPayload {
        message: e.to_string(),
    })
}
