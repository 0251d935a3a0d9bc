//! Response mapping for rejected webhook deliveries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every way a delivery can fail after reaching the handler.
///
/// Bodies are fixed plain-text strings; causes are logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookRejection {
    /// One of the `svix-*` headers is missing.
    MissingHeaders,
    /// Signature, timestamp or payload did not verify.
    Verification,
    /// The datastore rejected the insert.
    CreateFailed,
    /// The datastore rejected the update.
    UpdateFailed,
}

impl WebhookRejection {
    /// Returns the HTTP status for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHeaders | Self::Verification => StatusCode::BAD_REQUEST,
            Self::CreateFailed | Self::UpdateFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the response body for this rejection.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingHeaders => "Error occurred -- no svix headers",
            Self::Verification => "Error occurred",
            Self::CreateFailed => "Failed to create the user!",
            Self::UpdateFailed => "Failed to update the user!",
        }
    }
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}
