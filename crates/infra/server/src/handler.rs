//! The Clerk webhook endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use usersync_webhooks::{EventKind, SvixHeaders, UserEventData, WebhookEvent};

use crate::error::WebhookRejection;
use crate::state::AppState;

/// Body returned after a `user.created` write.
pub const CREATED: &str = "User has been created!";
/// Body returned after a `user.updated` write.
pub const UPDATED: &str = "User has been updated!";
/// Body returned for verified events that need no write.
pub const RECEIVED: &str = "Webhook received";

/// Verifies a delivery and mirrors `user.created` / `user.updated` into the
/// datastore. Other event types are acknowledged and ignored.
///
/// At most one write is issued per request.
pub async fn clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    let svix = SvixHeaders::from_header_map(&headers).map_err(|e| {
        tracing::warn!(error = %e, "Rejected webhook without svix headers");
        WebhookRejection::MissingHeaders
    })?;

    let event = state.receiver.verify(&svix, &body).map_err(|e| {
        tracing::warn!(msg_id = %svix.id, error = %e, "Error verifying webhook");
        WebhookRejection::Verification
    })?;

    tracing::info!(msg_id = %svix.id, event_type = %event.event_type, "Webhook received");
    tracing::debug!(msg_id = %svix.id, body = %String::from_utf8_lossy(&body), "Webhook body");

    match event.kind() {
        EventKind::UserCreated => create_user(&state, &svix.id, &event).await,
        EventKind::UserUpdated => update_user(&state, &svix.id, &event).await,
        EventKind::Other => {
            tracing::debug!(
                msg_id = %svix.id,
                event_type = %event.event_type,
                "Ignoring unhandled webhook event"
            );
            Ok(RECEIVED)
        }
    }
}

async fn create_user(
    state: &AppState,
    msg_id: &str,
    event: &WebhookEvent,
) -> Result<&'static str, WebhookRejection> {
    let data = user_data(msg_id, event)?;

    let new_user = state
        .defaults
        .new_user(data.id.as_str(), data.username.as_deref(), data.image_url.as_deref());

    match state.adapter.create_user(&new_user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User created");
            Ok(CREATED)
        }
        Err(e) => {
            tracing::error!(user_id = %data.id, error = %e, "Failed to create user");
            Err(WebhookRejection::CreateFailed)
        }
    }
}

async fn update_user(
    state: &AppState,
    msg_id: &str,
    event: &WebhookEvent,
) -> Result<&'static str, WebhookRejection> {
    let data = user_data(msg_id, event)?;

    let patch = state
        .defaults
        .patch(data.username.as_deref(), data.image_url.as_deref());

    match state.adapter.update_user(&data.id, &patch).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User updated");
            Ok(UPDATED)
        }
        Err(e) => {
            tracing::error!(user_id = %data.id, error = %e, "Failed to update user");
            Err(WebhookRejection::UpdateFailed)
        }
    }
}

fn user_data(msg_id: &str, event: &WebhookEvent) -> Result<UserEventData, WebhookRejection> {
    event.user_data().map_err(|e| {
        tracing::warn!(msg_id, event_type = %event.event_type, error = %e, "Malformed user event");
        WebhookRejection::Verification
    })
}
