//! Configuration management for gitbridge.

pub mod paths;
pub mod settings;

pub use paths::config_file;
pub use settings::{BridgeConfig, CredentialsConfig, GitConfig, SetupConfig};

use std::path::Path;

use crate::error::{BridgeError, Result};

/// Load configuration from the default config file.
///
/// If the config file doesn't exist, returns default configuration.
pub fn load_config() -> Result<BridgeConfig> {
    let path = config_file()?;
    load_config_from(&path)
}

/// Load configuration from a specific path.
///
/// If the file doesn't exist, returns default configuration.
pub fn load_config_from(path: &Path) -> Result<BridgeConfig> {
    Ok(read_config(path)?.with_env_overrides())
}

/// Read the config file as written, without environment overrides.
pub fn read_config(path: &Path) -> Result<BridgeConfig> {
    if !path.exists() {
        return Ok(BridgeConfig::default());
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| BridgeError::ConfigRead(e.to_string()))
}

/// Save configuration to a specific path.
pub fn save_config_to(config: &BridgeConfig, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| BridgeError::ConfigWrite(e.to_string()))?;
    std::fs::write(path, contents)?;

    Ok(())
}
