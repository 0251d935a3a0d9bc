//! # Usersync Core
//!
//! Foundational types for mirroring identity-provider users into the
//! application datastore. It defines the persisted `UserRecord`, the write
//! models used to create and patch it, the `SyncError` type and the
//! `StorageAdapter` trait that datastore backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{SyncError, SyncResult};
pub use traits::StorageAdapter;
pub use types::{NewUser, ProfileDefaults, UserPatch, UserRecord};
