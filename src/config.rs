// 🔧 Configuration - Bind address, lookup policy, logging
// Defaults < TOML file < environment variables

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Overrides `bind_addr`, e.g. "0.0.0.0:8080"
pub const BIND_ADDR_ENV: &str = "RECEIPT_POINTS_BIND_ADDR";

/// Overrides `unknown_id_as_zero`, "true" or "false"
pub const UNKNOWN_ID_AS_ZERO_ENV: &str = "RECEIPT_POINTS_UNKNOWN_ID_AS_ZERO";

/// Path to a TOML config file, used when no `--config` flag is given
pub const CONFIG_PATH_ENV: &str = "RECEIPT_POINTS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

// ============================================================================
// LOGGING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset, e.g. "info" or "receipt_points=debug"
    pub level: String,

    /// "pretty" or "json"
    pub format: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => fmt().json().with_env_filter(filter).init(),
            _ => fmt().with_env_filter(filter).init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

// ============================================================================
// SERVER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Answer `{"points": 0}` instead of 404 for ids that were never issued
    pub unknown_id_as_zero: bool,

    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            unknown_id_as_zero: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Resolve the effective config: optional file, then environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value,
            })?;
        }

        if let Some(value) = lookup(UNKNOWN_ID_AS_ZERO_ENV) {
            self.unknown_id_as_zero = value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: UNKNOWN_ID_AS_ZERO_ENV,
                value,
            })?;
        }

        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
