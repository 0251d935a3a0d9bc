//! Shared handler state.

use std::sync::Arc;
use usersync_core::{ProfileDefaults, StorageAdapter};
use usersync_webhooks::WebhookReceiver;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub receiver: Arc<WebhookReceiver>,
    pub adapter: Arc<dyn StorageAdapter>,
    pub defaults: Arc<ProfileDefaults>,
}

impl AppState {
    /// Creates the handler state.
    pub fn new(
        receiver: WebhookReceiver,
        adapter: Arc<dyn StorageAdapter>,
        defaults: ProfileDefaults,
    ) -> Self {
        Self {
            receiver: Arc::new(receiver),
            adapter,
            defaults: Arc::new(defaults),
        }
    }
}
