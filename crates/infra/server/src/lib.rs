//! # Usersync Server
//!
//! Receives Clerk user lifecycle webhooks and mirrors the profile fields
//! the application needs (id, username, avatar) into its own database.

mod config;
mod error;
pub mod handler;
mod state;

pub use config::{
    CONFIG_PATH_ENV, ConfigError, ServerConfig, WebhookSettings, load_config, parse_config,
};
pub use error::WebhookRejection;
pub use state::AppState;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Path the identity provider posts to.
pub const WEBHOOK_PATH: &str = "/api/webhooks/clerk";

/// Builds the application router.
pub fn webhook_router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(handler::clerk_webhook))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// The webhook server.
pub struct WebhookServer {
    /// Server configuration.
    pub config: ServerConfig,
    state: AppState,
}

impl WebhookServer {
    /// Creates a new server around prepared handler state.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Returns the router served by [`WebhookServer::run`].
    pub fn router(&self) -> Router {
        webhook_router(self.state.clone())
    }

    /// Binds the configured address and serves until the process exits.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!(%addr, path = WEBHOOK_PATH, "Starting usersync server");
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
