//! Usersync server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use usersync_adapter_sea_orm::SeaOrmAdapter;
use usersync_server::{AppState, ServerConfig, WebhookServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration; a missing signing secret stops here
    let config = ServerConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let receiver = config.webhook_receiver()?;
    let adapter = SeaOrmAdapter::connect(&config.database).await?;
    let state = AppState::new(receiver, Arc::new(adapter), config.defaults.clone());

    // Create and run server
    let server = WebhookServer::new(config, state);
    server.run().await?;

    Ok(())
}
