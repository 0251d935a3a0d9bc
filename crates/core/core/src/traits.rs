//! Core traits for usersync.
//!
//! Storage backends implement [`StorageAdapter`] so the webhook handler can
//! stay unaware of which datastore it writes to.

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::types::{NewUser, UserPatch, UserRecord};

/// Trait for storage adapters (database backends).
///
/// Each method issues at most one write. Adapters do not retry and do not
/// open transactions.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Inserts a new user.
    ///
    /// Returns `SyncError::DuplicateEntry` if a user with the same id exists.
    async fn create_user(&self, user: &NewUser) -> SyncResult<UserRecord>;

    /// Updates the username and avatar of the user with the given id.
    ///
    /// Returns `SyncError::NotFound` if no such user exists.
    async fn update_user(&self, id: &str, patch: &UserPatch) -> SyncResult<UserRecord>;

    /// Gets a user by id.
    async fn get_user_by_id(&self, id: &str) -> SyncResult<Option<UserRecord>>;
}
