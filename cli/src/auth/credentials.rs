//! Secure token storage using the operating system keyring.
//!
//! This module provides platform-specific secure storage for a personal
//! access token:
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - Windows: Credential Manager
//!
//! The token is stored as-is under one service/account pair.

use keyring::Entry;

use crate::config::CredentialsConfig;
use crate::error::{BridgeError, Result};

/// Storage for a single secret (enables mocking).
#[cfg_attr(test, mockall::automock)]
pub trait SecretStore {
    /// Stores `secret`, replacing any previous value.
    fn save(&self, secret: &str) -> Result<()>;

    /// Returns the stored secret, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>>;

    /// Removes the stored secret. Returns `false` if there was none.
    fn delete(&self) -> Result<bool>;
}

/// Token store backed by the OS keyring.
pub struct KeyringStore {
    entry: Entry,
}

impl KeyringStore {
    /// Opens the keyring entry named by the credentials configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::CredentialStorage`] if the keyring entry cannot be created,
    /// which may occur if the keyring service is unavailable or locked.
    pub fn new(config: &CredentialsConfig) -> Result<Self> {
        let entry = Entry::new(&config.service, &config.account)
            .map_err(|e| BridgeError::CredentialStorage(e.to_string()))?;
        Ok(Self { entry })
    }
}

impl SecretStore for KeyringStore {
    fn save(&self, secret: &str) -> Result<()> {
        self.entry
            .set_password(secret)
            .map_err(|e| BridgeError::CredentialStorage(e.to_string()))
    }

    fn load(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self) -> Result<bool> {
        match self.entry.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(BridgeError::CredentialStorage(e.to_string())),
        }
    }
}
