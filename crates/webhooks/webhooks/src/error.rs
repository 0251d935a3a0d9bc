//! Webhook error types.

use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook operations.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// One of the `svix-*` headers is absent or empty.
    #[error("Missing webhook header: {0}")]
    MissingHeaders(&'static str),

    /// Invalid signature.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp outside the tolerance window.
    #[error("Signature expired")]
    ExpiredSignature,

    /// Invalid payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The signing secret cannot be used.
    #[error("Invalid signing secret: {0}")]
    InvalidSecret(String),
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}
