//! Registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SELLER_REGISTRY_PATH` - Path of the JSON document (default: `data/sellers.json`)
//! - `SELLER_REGISTRY_QUARANTINE` - Move an unreadable document aside before
//!   falling back to the seed dataset (default: `true`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PATH: &str = "data/sellers.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Seller registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Location of the backing JSON document
    pub path: PathBuf,
    /// Keep a copy of a document that failed to load
    pub quarantine_corrupt: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            quarantine_corrupt: true,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let path = PathBuf::from(get_env_or_default("SELLER_REGISTRY_PATH", DEFAULT_PATH));
        let quarantine_corrupt = get_optional_env("SELLER_REGISTRY_QUARANTINE")
            .map(|value| parse_bool("SELLER_REGISTRY_QUARANTINE", &value))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            path,
            quarantine_corrupt,
        })
    }

    /// Returns a copy of this configuration pointing at another document.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
