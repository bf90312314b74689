//! Service Configuration Module
//!
//! Provides configuration loading for Bestiary services from built-in
//! defaults, an optional TOML file and environment overrides.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::service;

/// Main service configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub moderation: ModerationConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_user_limit: usize,
}

/// Content filter settings; an empty list means the built-in word list
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModerationConfig {
    pub blocked_words: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: service::server::BIND_ADDRESS.to_string(),
            port: service::server::PORT,
            enable_cors: service::server::ENABLE_CORS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: service::logging::LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_user_limit: service::pagination::DEFAULT_USER_LIMIT,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: service::security::BCRYPT_COST,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl ServiceConfig {
    /// Load configuration with file and environment overrides
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&ServiceConfig::default())
            .context("Failed to encode default configuration")?;

        let file = match path {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                File::from(path).required(true)
            }
            None => File::with_name(service::DEFAULT_CONFIG_PATH).required(false),
        };

        let config = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(service::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: ServiceConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    ServiceConfig::load(path)
}
