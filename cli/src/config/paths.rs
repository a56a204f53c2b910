//! Platform-specific path utilities for gitbridge.

use std::path::PathBuf;

use crate::error::{BridgeError, Result};

/// Get the configuration directory for gitbridge.
///
/// - Linux: `~/.config/gitbridge`
/// - macOS: `~/Library/Application Support/gitbridge`
/// - Windows: `%APPDATA%\gitbridge`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| BridgeError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join("gitbridge"))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the user's SSH directory (`~/.ssh`).
pub fn ssh_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BridgeError::Config("Cannot determine home directory".to_string()))?;
    Ok(home.join(".ssh"))
}
