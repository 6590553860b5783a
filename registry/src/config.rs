//! Registry configuration with TOML file support.

use crate::error::RegistryError;
use idreg_types::Principal;
use idreg_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one registry instance.
///
/// Can be loaded from a TOML file via [`RegistryConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The owner principal as `0x`-prefixed hex. Required.
    pub owner: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of request slots to pre-allocate in the request log.
    #[serde(default = "default_request_capacity")]
    pub request_capacity: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_capacity() -> usize {
    1024
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RegistryConfig {
    /// A config with defaults for everything but the owner.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner: owner.to_string(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            request_capacity: default_request_capacity(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RegistryError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        let config: Self = toml::from_str(s).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.owner_principal()?;
        config.log_format()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RegistryError> {
        toml::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))
    }

    pub fn owner_principal(&self) -> Result<Principal, RegistryError> {
        let owner: Principal = self
            .owner
            .parse()
            .map_err(|e| RegistryError::Config(format!("owner: {e}")))?;
        if owner.is_zero() {
            return Err(RegistryError::Config("owner must not be the null principal".into()));
        }
        Ok(owner)
    }

    pub fn log_format(&self) -> Result<LogFormat, RegistryError> {
        self.log_format
            .parse()
            .map_err(|e| RegistryError::Config(format!("log_format: {e}")))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), RegistryError> {
        idreg_utils::init_logging(self.log_format()?, &self.log_level)
            .map_err(|e| RegistryError::Config(e.to_string()))
    }
}
