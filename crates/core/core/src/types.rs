//! Core data types for usersync.
//!
//! `UserRecord` is the row the application owns. `NewUser` and `UserPatch`
//! are the two write shapes: a full record for creation and the subset of
//! fields an update is allowed to touch.

use serde::{Deserialize, Serialize};

/// Avatar stored when the provider sends no image.
pub const DEFAULT_AVATAR: &str = "/noAvatar.png";

/// Cover image assigned to every new user.
pub const DEFAULT_COVER: &str = "/noCover.png";

/// Display name stored when the provider sends no username.
pub const DEFAULT_USERNAME: &str = "defaultUsername";

/// A user as persisted in the application datastore.
///
/// The `id` is the identity provider's user id. It is never generated
/// locally and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Provider-issued identifier, also the primary key.
    pub id: String,

    /// Display name.
    pub username: String,

    /// Avatar URL or sentinel path.
    pub avatar: String,

    /// Cover image URL, set once at creation.
    pub cover: String,
}

/// Fields written when a user is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub cover: String,
}

impl From<NewUser> for UserRecord {
    fn from(user: NewUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            cover: user.cover,
        }
    }
}

/// Fields an update event may change. `id` and `cover` are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: String,
    pub avatar: String,
}

impl UserPatch {
    /// Applies the patch to an existing record.
    pub fn apply_to(&self, user: &mut UserRecord) {
        user.username = self.username.clone();
        user.avatar = self.avatar.clone();
    }
}

/// Fallback values for profile fields the provider leaves blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDefaults {
    /// Username used when the event carries none.
    pub username: String,
    /// Avatar used when the event carries no image URL.
    pub avatar: String,
    /// Cover assigned on creation.
    pub cover: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            cover: DEFAULT_COVER.to_string(),
        }
    }
}

impl ProfileDefaults {
    /// Builds the record to insert for a newly created provider user.
    ///
    /// Absent or empty `username`/`image_url` fall back to the defaults.
    pub fn new_user(
        &self,
        id: impl Into<String>,
        username: Option<&str>,
        image_url: Option<&str>,
    ) -> NewUser {
        NewUser {
            id: id.into(),
            username: self.username_or_default(username),
            avatar: self.avatar_or_default(image_url),
            cover: self.cover.clone(),
        }
    }

    /// Builds the patch for an updated provider user, with the same
    /// fallback rule as [`ProfileDefaults::new_user`].
    pub fn patch(&self, username: Option<&str>, image_url: Option<&str>) -> UserPatch {
        UserPatch {
            username: self.username_or_default(username),
            avatar: self.avatar_or_default(image_url),
        }
    }

    fn username_or_default(&self, username: Option<&str>) -> String {
        non_empty(username).unwrap_or(&self.username).to_string()
    }

    fn avatar_or_default(&self, image_url: Option<&str>) -> String {
        non_empty(image_url).unwrap_or(&self.avatar).to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_uses_event_fields() {
        let defaults = ProfileDefaults::default();
        let user = defaults.new_user("U1", Some("alice"), Some("http://x/a.png"));

        assert_eq!(user.id, "U1");
        assert_eq!(user.username, "alice");
        assert_eq!(user.avatar, "http://x/a.png");
        assert_eq!(user.cover, DEFAULT_COVER);
    }

    #[test]
    fn test_new_user_falls_back_to_defaults() {
        let defaults = ProfileDefaults::default();

        let user = defaults.new_user("U1", None, None);
        assert_eq!(user.username, DEFAULT_USERNAME);
        assert_eq!(user.avatar, DEFAULT_AVATAR);

        // Empty strings count as absent
        let user = defaults.new_user("U1", Some(""), Some(""));
        assert_eq!(user.username, DEFAULT_USERNAME);
        assert_eq!(user.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_patch_leaves_id_and_cover() {
        let mut record = UserRecord::from(ProfileDefaults::default().new_user(
            "U1",
            Some("alice"),
            Some("http://x/a.png"),
        ));

        let patch = ProfileDefaults::default().patch(Some("alice2"), None);
        patch.apply_to(&mut record);

        assert_eq!(record.id, "U1");
        assert_eq!(record.username, "alice2");
        assert_eq!(record.avatar, DEFAULT_AVATAR);
        assert_eq!(record.cover, DEFAULT_COVER);
    }

    #[test]
    fn test_custom_defaults_deserialize_partially() {
        let defaults: ProfileDefaults =
            serde_json::from_str(r#"{"avatar": "/img/blank.png"}"#).unwrap();

        assert_eq!(defaults.avatar, "/img/blank.png");
        assert_eq!(defaults.cover, DEFAULT_COVER);
        assert_eq!(defaults.username, DEFAULT_USERNAME);
    }
}
