//! Error types and result aliases for gitbridge.
//!
//! This module provides the top-level error handling system with:
//! - Specific error variants for different failure modes
//! - User-friendly error messages with recovery suggestions
//! - Helper methods for error classification
//! - Automatic conversion from common error types

use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;

/// Main error type for gitbridge operations.
///
/// Each variant includes a user-friendly message with actionable recovery steps.
/// Use [`is_fatal`](Self::is_fatal) to decide whether the process (or the
/// interactive menu) must stop.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The selected path does not exist or is not a directory.
    #[error("{} is not a valid directory", .0.display())]
    InvalidPath(PathBuf),

    /// Failed to access the OS keyring.
    #[error("Failed to access credential storage: {0}. Ensure your system keyring is unlocked.")]
    CredentialStorage(String),

    /// Stored token is unreadable.
    #[error("Stored access token is unreadable. Run 'gitbridge token delete' then 'gitbridge token set'.")]
    InvalidCredentials,

    /// `git show` produced nothing for the selected commit.
    #[error("Could not retrieve diff for commit {0}.")]
    EmptyDiff(String),

    /// A history entry number outside the listed range.
    #[error("No commit numbered {0} in the history. Run 'gitbridge history' to list them.")]
    NoSuchHistoryEntry(usize),

    /// A history pick that is not a number.
    #[error("'{0}' is not a commit number. Enter one of the numbers in brackets.")]
    InvalidHistorySelection(String),

    /// Opening the system browser failed.
    #[error("Could not open a browser for {url}: {reason}")]
    Browser {
        /// The page that was requested.
        url: String,
        /// Why the launcher failed.
        reason: String,
    },

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// Failed to write configuration file.
    #[error("Failed to write configuration file: {0}. Check directory permissions.")]
    ConfigWrite(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("Data serialization error: {0}")]
    Serialization(String),

    /// Git operation error.
    #[error(transparent)]
    Git(#[from] GitError),
}

impl BridgeError {
    /// Checks if this error must end the program.
    ///
    /// Only a missing `git` executable is fatal; every other failure is
    /// reported and the user may carry on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Git(e) if e.is_not_installed())
    }

    /// Standard error of a failed git command.
    #[must_use]
    pub fn git_stderr(&self) -> Option<&str> {
        match self {
            Self::Git(e) => e.stderr(),
            _ => None,
        }
    }

    /// Checks if this error came from a git command exiting unsuccessfully.
    #[must_use]
    pub const fn is_command_failure(&self) -> bool {
        matches!(self, Self::Git(GitError::CommandFailed { .. }))
    }
}

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for BridgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigWrite(format!("TOML serialize error: {err}"))
    }
}

impl From<keyring::Error> for BridgeError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::BadEncoding(_) => Self::InvalidCredentials,
            other => Self::CredentialStorage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_path_names_the_path() {
        let err = BridgeError::InvalidPath(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "/no/such/dir is not a valid directory");
    }

    #[test]
    fn empty_diff_names_the_commit() {
        let err = BridgeError::EmptyDiff("a1b2c3d".to_string());
        assert_eq!(err.to_string(), "Could not retrieve diff for commit a1b2c3d.");
    }

    #[test]
    fn missing_git_is_fatal() {
        let err: BridgeError = GitError::NotInstalled {
            program: "git".to_string(),
        }
        .into();
        assert!(err.is_fatal());
        assert!(!err.is_command_failure());
    }

    #[test]
    fn command_failure_is_recoverable() {
        let err: BridgeError = GitError::CommandFailed {
            command: "git push".to_string(),
            stderr: "rejected".to_string(),
        }
        .into();
        assert!(!err.is_fatal());
        assert!(err.is_command_failure());
        assert!(!BridgeError::InvalidPath(PathBuf::from("x")).is_fatal());
        assert!(!BridgeError::CredentialStorage("locked".to_string()).is_fatal());
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: BridgeError = json_err.into();
        assert!(matches!(err, BridgeError::Serialization(_)));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }

    #[test]
    fn from_keyring_error() {
        let err: BridgeError = keyring::Error::NoStorageAccess(
            std::io::Error::new(std::io::ErrorKind::Other, "locked").into(),
        )
        .into();
        assert!(matches!(err, BridgeError::CredentialStorage(_)));
    }
}
