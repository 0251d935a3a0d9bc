//! Webhook receiver for verifying incoming webhooks.

use crate::error::{WebhookError, WebhookResult};
use crate::event::WebhookEvent;
use crate::headers::SvixHeaders;
use crate::signature::{SignatureError, WebhookSigner};

/// Default tolerance for timestamp validation (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Webhook receiver for verifying incoming webhooks.
#[derive(Debug, Clone)]
pub struct WebhookReceiver {
    signer: WebhookSigner,
    /// Tolerance for timestamp validation (in seconds).
    tolerance_secs: i64,
}

impl WebhookReceiver {
    /// Creates a new webhook receiver from an endpoint secret.
    pub fn new(secret: &str) -> WebhookResult<Self> {
        Ok(Self::from_signer(WebhookSigner::new(secret)?))
    }

    /// Creates a receiver around an existing signer.
    pub fn from_signer(signer: WebhookSigner) -> Self {
        Self {
            signer,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Sets the timestamp tolerance.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Returns the timestamp tolerance in seconds.
    pub fn tolerance_secs(&self) -> i64 {
        self.tolerance_secs
    }

    /// Verifies a webhook signature and parses the payload.
    ///
    /// `payload` must be the body exactly as received.
    pub fn verify(&self, headers: &SvixHeaders, payload: &[u8]) -> WebhookResult<WebhookEvent> {
        self.verify_signature(headers, payload)?;

        let event: WebhookEvent = serde_json::from_slice(payload)?;
        Ok(event)
    }

    /// Verifies only the signature without parsing.
    pub fn verify_signature(&self, headers: &SvixHeaders, payload: &[u8]) -> WebhookResult<()> {
        self.signer
            .verify_header(
                &headers.signature,
                &headers.id,
                &headers.timestamp,
                payload,
                self.tolerance_secs,
            )
            .map_err(|e| match e {
                SignatureError::InvalidFormat | SignatureError::Invalid => {
                    WebhookError::InvalidSignature
                }
                SignatureError::Expired => WebhookError::ExpiredSignature,
            })
    }
}
