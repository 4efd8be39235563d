//! Webhook-specific error types.
//!
//! Verification failures are intentionally generic: the messages never say
//! which part of the signature was wrong.

use thiserror::Error;

/// Error type for webhook verification.
///
/// # Example
///
/// ```rust
/// use easypost::webhooks::WebhookError;
///
/// let error = WebhookError::InvalidSignature;
/// assert_eq!(error.to_string(), "Webhook signature verification failed");
/// ```
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request carried no `X-Hmac-Signature` header.
    #[error("Webhook request has no signature header")]
    MissingSignature,

    /// The signature did not match the body and secret.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The body was authentic but could not be decoded.
    #[error("Invalid webhook payload: {message}")]
    InvalidPayload {
        /// What went wrong while decoding.
        message: String,
    },
}

// Verify WebhookError is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};
