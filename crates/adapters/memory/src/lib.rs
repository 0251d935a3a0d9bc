//! # Usersync Memory Adapter
//!
//! An in-memory storage adapter for usersync, primarily intended
//! for testing and development purposes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use usersync_adapter_memory::MemoryAdapter;
//! use usersync_server::{AppState, webhook_router};
//!
//! let adapter = MemoryAdapter::new();
//! let state = AppState::new(receiver, Arc::new(adapter.clone()), ProfileDefaults::default());
//! let app = webhook_router(state);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use usersync_core::error::{SyncError, SyncResult};
use usersync_core::traits::StorageAdapter;
use usersync_core::types::{NewUser, UserPatch, UserRecord};

/// In-memory storage adapter for usersync.
///
/// Data is lost when the process exits. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryAdapter {
    /// Creates a new in-memory adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter pre-populated with the given users.
    ///
    /// Seeding does not count towards [`MemoryAdapter::write_count`].
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        self.users.write().await.clear();
        self.writes.store(0, Ordering::SeqCst);
    }

    /// Returns the number of users stored.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns the number of successful writes since creation or the last clear.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageAdapter for MemoryAdapter {
    async fn create_user(&self, user: &NewUser) -> SyncResult<UserRecord> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(SyncError::duplicate("user", "id", &user.id));
        }

        let record = UserRecord::from(user.clone());
        users.insert(record.id.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        tracing::trace!(user_id = %record.id, "memory adapter inserted user");
        Ok(record)
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> SyncResult<UserRecord> {
        let mut users = self.users.write().await;

        let record = users
            .get_mut(id)
            .ok_or_else(|| SyncError::not_found("user", "id", id))?;

        patch.apply_to(record);
        self.writes.fetch_add(1, Ordering::SeqCst);

        tracing::trace!(user_id = %id, "memory adapter updated user");
        Ok(record.clone())
    }

    async fn get_user_by_id(&self, id: &str) -> SyncResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }
}
