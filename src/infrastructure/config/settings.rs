//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all service settings.
//! Configuration is loaded from a TOML file; a handful of deployment values
//! can be overridden from the environment:
//!
//! | Variable                  | Overrides              |
//! |---------------------------|------------------------|
//! | `SPYCATS_PORT`            | `server.port`          |
//! | `SPYCATS_DATABASE`        | `database.path`        |
//! | `SPYCATS_CATALOG_URL`     | `catalog.url`          |
//! | `SPYCATS_CATALOG_API_KEY` | `catalog.api_key`      |
//!
//! # Example
//!
//! ```no_run
//! use spycats::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `bind:port`, ready for a TCP listener.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// SQLite settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "spycats.db".into(),
            pool_size: 5,
        }
    }
}

/// Which breed catalog backs cat registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    TheCatApi,
    Static,
}

/// Breed catalog settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub kind: CatalogKind,
    /// Base URL; breeds are fetched from `{url}/breeds`.
    pub url: String,
    pub api_key: Option<String>,
    /// Upper bound on a whole catalog lookup.
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Breed names served by the `static` catalog.
    pub breeds: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            kind: CatalogKind::TheCatApi,
            url: "https://api.thecatapi.com/v1".into(),
            api_key: None,
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            breeds: Vec::new(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Parse TOML, apply environment overrides, and validate.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Like [`parse_toml`](Self::parse_toml) with an explicit variable lookup.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn apply_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = env("SPYCATS_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "SPYCATS_PORT",
                reason: format!("{port:?} is not a port number"),
            })?;
        }
        if let Some(path) = env("SPYCATS_DATABASE") {
            self.database.path = path;
        }
        if let Some(url) = env("SPYCATS_CATALOG_URL") {
            self.catalog.url = url;
        }
        if let Some(key) = env("SPYCATS_CATALOG_API_KEY") {
            self.catalog.api_key = Some(key).filter(|k| !k.is_empty());
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        if self.catalog.timeout_ms == 0 || self.catalog.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog timeouts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        match self.catalog.kind {
            CatalogKind::TheCatApi if self.catalog.url.trim().is_empty() => {
                Err(ConfigError::MissingField {
                    field: "catalog.url",
                }
                .into())
            }
            CatalogKind::Static if self.catalog.breeds.is_empty() => {
                Err(ConfigError::MissingField {
                    field: "catalog.breeds",
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
