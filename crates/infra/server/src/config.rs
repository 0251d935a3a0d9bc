//! Server configuration.
//!
//! Values come from an optional TOML file, then environment variables, and
//! are validated once before anything binds. The signing secret has no
//! default: a server without one refuses to start.

use serde::{Deserialize, Serialize};
use usersync_adapter_sea_orm::DatabaseConfig;
use usersync_core::ProfileDefaults;
use usersync_webhooks::{DEFAULT_TOLERANCE_SECS, WebhookReceiver};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "USERSYNC_CONFIG";

/// Server-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
    /// Log level, used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Webhook verification settings.
    pub webhook: WebhookSettings,
    /// Fallbacks for profile fields the provider leaves blank.
    pub defaults: ProfileDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            database: DatabaseConfig::default(),
            webhook: WebhookSettings::default(),
            defaults: ProfileDefaults::default(),
        }
    }
}

/// Webhook verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Endpoint signing secret (`whsec_...`).
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    /// Accepted clock skew for `svix-timestamp`, in seconds.
    pub tolerance_secs: i64,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            secret: None,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }
}

impl ServerConfig {
    /// Loads the config used by the binary.
    ///
    /// The file path is the first CLI argument or `USERSYNC_CONFIG`; without
    /// either, defaults are used. Environment overrides are applied last and
    /// the result is validated.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());

        let config = match path {
            Some(path) => load_config(&path)?,
            None => Self::default(),
        };

        let config = config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Recognised keys: `USERSYNC_HOST`, `USERSYNC_PORT`, `USERSYNC_LOG_LEVEL`,
    /// `DATABASE_URL`, `WEBHOOK_SECRET`, `WEBHOOK_TOLERANCE_SECS`.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("USERSYNC_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("USERSYNC_PORT") {
            self.port = parse_var("USERSYNC_PORT", &port)?;
        }
        if let Some(level) = lookup("USERSYNC_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("WEBHOOK_SECRET") {
            self.webhook.secret = Some(secret);
        }
        if let Some(tolerance) = lookup("WEBHOOK_TOLERANCE_SECS") {
            self.webhook.tolerance_secs = parse_var("WEBHOOK_TOLERANCE_SECS", &tolerance)?;
        }

        Ok(self)
    }

    /// Checks the config is complete enough to serve requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must be non-zero"));
        }
        if self.webhook.tolerance_secs <= 0 {
            return Err(ConfigError::invalid("webhook.tolerance_secs", "must be positive"));
        }
        self.webhook_receiver().map(|_| ())
    }

    /// Builds the verifying receiver from the configured secret.
    pub fn webhook_receiver(&self) -> Result<WebhookReceiver, ConfigError> {
        let secret = self
            .webhook
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing { key: "WEBHOOK_SECRET" })?;

        let receiver = WebhookReceiver::new(secret)
            .map_err(|e| ConfigError::invalid("WEBHOOK_SECRET", e.to_string()))?;

        Ok(receiver.with_tolerance(self.webhook.tolerance_secs))
    }

    /// Returns the `host:port` pair to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, e.to_string()))
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &str) -> Result<ServerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Missing configuration: {key}")]
    Missing { key: &'static str },
    #[error("Invalid configuration for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
