//! Clerk event payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WebhookError, WebhookResult};

/// Tag of the event sent when an account is created.
pub const USER_CREATED: &str = "user.created";
/// Tag of the event sent when profile fields change.
pub const USER_UPDATED: &str = "user.updated";

/// A verified inbound event.
///
/// `data` stays untyped until the event tag is known; the provider adds new
/// event types over time and their payloads are not ours to validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event type.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    #[serde(default)]
    pub data: Value,
}

/// The event tags this service acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserCreated,
    UserUpdated,
    /// Anything else, acknowledged without a write.
    Other,
}

impl EventKind {
    /// Classifies an event tag by exact string match.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            USER_CREATED => EventKind::UserCreated,
            USER_UPDATED => EventKind::UserUpdated,
            _ => EventKind::Other,
        }
    }
}

impl WebhookEvent {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        EventKind::from_tag(&self.event_type)
    }

    /// Decodes `data` as a user payload.
    pub fn user_data(&self) -> WebhookResult<UserEventData> {
        UserEventData::deserialize(&self.data)
            .map_err(|e| WebhookError::InvalidPayload(format!("invalid user data: {e}")))
    }
}

/// The user fields mirrored from `user.created` / `user.updated` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEventData {
    /// Provider user id.
    pub id: String,
    /// Display name, when usernames are enabled.
    #[serde(default)]
    pub username: Option<String>,
    /// Profile image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_event_parsing() {
        let json = r#"{
            "object": "event",
            "type": "user.created",
            "data": {
                "id": "user_29w83sxmDNGwOuEthce5gg56FcC",
                "username": "alice",
                "image_url": "https://img.clerk.com/a.png",
                "email_addresses": []
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind(), EventKind::UserCreated);

        let data = event.user_data().unwrap();
        assert_eq!(data.id, "user_29w83sxmDNGwOuEthce5gg56FcC");
        assert_eq!(data.username.as_deref(), Some("alice"));
        assert_eq!(data.image_url.as_deref(), Some("https://img.clerk.com/a.png"));
    }

    #[test]
    fn test_null_and_absent_optional_fields() {
        let json = r#"{"type": "user.updated", "data": {"id": "U1", "username": null}}"#;

        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind(), EventKind::UserUpdated);

        let data = event.user_data().unwrap();
        assert_eq!(data.username, None);
        assert_eq!(data.image_url, None);
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(EventKind::from_tag("user.deleted"), EventKind::Other);
        assert_eq!(EventKind::from_tag("session.created"), EventKind::Other);
        assert_eq!(EventKind::from_tag("User.Created"), EventKind::Other);
    }

    #[test]
    fn test_user_data_requires_id() {
        let json = r#"{"type": "user.created", "data": {"username": "alice"}}"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();

        assert!(matches!(event.user_data(), Err(WebhookError::InvalidPayload(_))));
    }
}
