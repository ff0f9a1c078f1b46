//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `devreg.toml` in the working directory. Server, database and
//! logging settings have sensible defaults so the file is optional. Store
//! settings have none: leaving them out is not a startup error, it is recorded
//! as a registry configuration failure and every request answers 500.

use devreg_app::config::StoreSettings;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Device table settings.
    pub store: StoreConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Target store identity and table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub region: Option<String>,
    pub table_name: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `devreg.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting server settings are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("devreg.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Later names in each group win over earlier ones.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("DEVREG_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("DEVREG_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        let bind = lookup("DEVREG_BIND");
        if let Some((host, port)) = bind.as_deref().and_then(|val| val.rsplit_once(':')) {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("DEVREG_DATABASE_URL") {
            self.database.url = val;
        }
        for name in ["AWS_REGION", "DEVREG_REGION"] {
            if let Some(val) = lookup(name) {
                self.store.region = Some(val);
            }
        }
        for name in ["DEVICES_TABLE_NAME", "DEVREG_TABLE_NAME"] {
            if let Some(val) = lookup(name) {
                self.store.table_name = Some(val);
            }
        }
        for name in ["DEVREG_LOG", "RUST_LOG"] {
            if let Some(val) = lookup(name) {
                self.logging.filter = val;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Raw store settings, validated later at registry resolution.
    #[must_use]
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            region: self.store.region.clone(),
            table_name: self.store.table_name.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:devreg.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "devreg=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
