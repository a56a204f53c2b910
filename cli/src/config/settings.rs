//! Application configuration settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::git::DEFAULT_GIT;

/// Main configuration for gitbridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Repository selection.
    pub repo: RepoConfig,
    /// External programs.
    pub git: GitConfig,
    /// Token storage.
    pub credentials: CredentialsConfig,
    /// First-time setup.
    pub setup: SetupConfig,
}

/// Repository selection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Path used when `--repo` is not given.
    pub default_path: Option<PathBuf>,
}

/// External program settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Git executable name or path.
    pub program: String,
    /// ssh-keygen executable name or path.
    pub ssh_keygen: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_GIT.to_string(),
            ssh_keygen: "ssh-keygen".to_string(),
        }
    }
}

/// Keyring entry holding the personal access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Keyring service name.
    pub service: String,
    /// Keyring account name.
    pub account: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service: "GitHub PAT".to_string(),
            account: "github.com".to_string(),
        }
    }
}

/// First-time setup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// SSH key file name under `~/.ssh`.
    pub key_name: String,
    /// Page where the public key gets registered.
    pub keys_url: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            key_name: "id_ed25519".to_string(),
            keys_url: "https://github.com/settings/keys".to_string(),
        }
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const REPO: &str = "GITBRIDGE_REPO";
    pub const GIT: &str = "GITBRIDGE_GIT";
    pub const LOG_LEVEL: &str = "GITBRIDGE_LOG";
}

impl BridgeConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(env::REPO).filter(|p| !p.is_empty()) {
            self.repo.default_path = Some(PathBuf::from(path));
        }

        if let Some(program) = lookup(env::GIT).filter(|p| !p.is_empty()) {
            self.git.program = program;
        }

        self
    }

    /// Keys accepted by [`get`](Self::get) and [`set`](Self::set).
    pub const KEYS: [&'static str; 7] = [
        "repo.default_path",
        "git.program",
        "git.ssh_keygen",
        "credentials.service",
        "credentials.account",
        "setup.key_name",
        "setup.keys_url",
    ];

    /// Value of a dotted key; an unset path is empty.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "repo.default_path" => self
                .repo
                .default_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "git.program" => self.git.program.clone(),
            "git.ssh_keygen" => self.git.ssh_keygen.clone(),
            "credentials.service" => self.credentials.service.clone(),
            "credentials.account" => self.credentials.account.clone(),
            "setup.key_name" => self.setup.key_name.clone(),
            "setup.keys_url" => self.setup.keys_url.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Changes a dotted key. An empty value clears `repo.default_path`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] for an unknown key or an empty value
    /// where one is required.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if key == "repo.default_path" {
            self.repo.default_path = (!value.is_empty()).then(|| PathBuf::from(value));
            return Ok(());
        }

        let slot = match key {
            "git.program" => &mut self.git.program,
            "git.ssh_keygen" => &mut self.git.ssh_keygen,
            "credentials.service" => &mut self.credentials.service,
            "credentials.account" => &mut self.credentials.account,
            "setup.key_name" => &mut self.setup.key_name,
            "setup.keys_url" => &mut self.setup.keys_url,
            _ => {
                return Err(BridgeError::Config(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        };
        if value.is_empty() {
            return Err(BridgeError::Config(format!("{key} cannot be empty")));
        }
        *slot = value.to_string();
        Ok(())
    }
}
