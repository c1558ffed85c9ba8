//! CLI command implementations.

use std::path::PathBuf;

use roastery_registry::{ConfigError, RegistryConfig, SellerRegistry};

pub mod registry;
pub mod sellers;

/// Build a lazily-loaded registry from the environment and `--data`.
///
/// # Errors
///
/// Returns an error if the registry environment variables are invalid.
pub fn open_registry(data: Option<PathBuf>) -> Result<SellerRegistry, ConfigError> {
    let mut config = RegistryConfig::from_env()?;
    if let Some(path) = data {
        config = config.with_path(path);
    }
    tracing::debug!(path = %config.path.display(), "Using seller document");
    Ok(SellerRegistry::from_config(&config))
}
