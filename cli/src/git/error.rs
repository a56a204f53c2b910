//! Git-specific error types.
//!
//! This module defines error types for git invocations:
//! - [`GitError`] - All git-related errors with user-friendly messages

use thiserror::Error;

/// Errors specific to running the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable could not be found.
    #[error("Git is not installed or not in PATH (looked for '{program}').")]
    NotInstalled {
        /// Program name or path that was tried.
        program: String,
    },

    /// The process could not be started for a reason other than absence.
    #[error("Failed to run '{program}': {reason}")]
    Launch {
        /// Program name or path that was tried.
        program: String,
        /// Underlying OS error.
        reason: String,
    },

    /// Git ran and exited unsuccessfully.
    #[error("'{command}' failed: {stderr}")]
    CommandFailed {
        /// The command line, for display.
        command: String,
        /// Captured standard error.
        stderr: String,
    },
}

impl GitError {
    /// Checks if this error means git is missing entirely.
    #[must_use]
    pub const fn is_not_installed(&self) -> bool {
        matches!(self, Self::NotInstalled { .. })
    }

    /// The captured standard error, when git actually ran.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
