//! # Usersync SeaORM Adapter
//!
//! Relational persistence for mirrored users using SeaORM. Works with any
//! backend SeaORM is built with here (PostgreSQL, SQLite).
//!
//! The adapter expects the `users` table described in [`entity`] to exist;
//! it never creates or migrates schema.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use usersync_adapter_sea_orm::{DatabaseConfig, SeaOrmAdapter};
//!
//! let adapter = SeaOrmAdapter::connect(&DatabaseConfig::new(database_url)).await?;
//! let created = adapter.create_user(&new_user).await?;
//! ```

mod config;
pub mod entity;

pub use config::DatabaseConfig;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, SqlErr,
};
use std::time::Duration;
use usersync_core::error::{SyncError, SyncResult};
use usersync_core::traits::StorageAdapter;
use usersync_core::types::{NewUser, UserPatch, UserRecord};

use entity::user;

/// SeaORM-backed storage adapter.
#[derive(Debug, Clone)]
pub struct SeaOrmAdapter {
    db: DatabaseConnection,
}

impl SeaOrmAdapter {
    /// Wraps an existing connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a connection pool from config.
    pub async fn connect(config: &DatabaseConfig) -> SyncResult<Self> {
        let mut opt = ConnectOptions::new(&config.url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.sqlx_logging);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SyncError::database(format!("Failed to connect to database: {e}")))?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database connected"
        );

        Ok(Self { db })
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn to_record(model: user::Model) -> UserRecord {
    UserRecord {
        id: model.id,
        username: model.username,
        avatar: model.avatar,
        cover: model.cover,
    }
}

/// Maps a write failure for user `id` onto the adapter error contract.
fn map_write_err(err: DbErr, id: &str) -> SyncError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return SyncError::duplicate("user", "id", id);
    }

    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
            SyncError::not_found("user", "id", id)
        }
        other => SyncError::database(other.to_string()),
    }
}

#[async_trait]
impl StorageAdapter for SeaOrmAdapter {
    async fn create_user(&self, new_user: &NewUser) -> SyncResult<UserRecord> {
        let model = user::ActiveModel {
            id: ActiveValue::Set(new_user.id.clone()),
            username: ActiveValue::Set(new_user.username.clone()),
            avatar: ActiveValue::Set(new_user.avatar.clone()),
            cover: ActiveValue::Set(new_user.cover.clone()),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &new_user.id))?;

        Ok(to_record(inserted))
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> SyncResult<UserRecord> {
        // cover stays NotSet so the UPDATE only touches username and avatar
        let model = user::ActiveModel {
            id: ActiveValue::Unchanged(id.to_string()),
            username: ActiveValue::Set(patch.username.clone()),
            avatar: ActiveValue::Set(patch.avatar.clone()),
            cover: ActiveValue::NotSet,
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, id))?;

        Ok(to_record(updated))
    }

    async fn get_user_by_id(&self, id: &str) -> SyncResult<Option<UserRecord>> {
        let found = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database(e.to_string()))?;

        Ok(found.map(to_record))
    }
}
