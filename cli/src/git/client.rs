//! Thin wrapper that runs the git executable.
//!
//! [`GitCli`] turns a [`CommandRunner`] result into `Result<stdout, GitError>`:
//! spawn failures become [`GitError::NotInstalled`] or [`GitError::Launch`],
//! a non-zero exit becomes [`GitError::CommandFailed`] carrying stderr.

use std::borrow::Cow;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::auth::redact_credentials;
use crate::git::error::GitError;
use crate::process::CommandRunner;

/// Default git program name, resolved through `PATH`.
pub const DEFAULT_GIT: &str = "git";

/// Runs git commands through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct GitCli<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> GitCli<R> {
    /// Creates a client that invokes `program` (usually `git`).
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// The git program this client invokes.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The runner used for git and for sibling tools like ssh-keygen.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `git <args>` in `cwd` and returns its stdout.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotInstalled`] when the executable is missing
    /// - [`GitError::Launch`] for any other spawn failure
    /// - [`GitError::CommandFailed`] when git exits unsuccessfully
    pub fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError> {
        let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let output = self
            .runner
            .run(&self.program, &owned, cwd)
            .map_err(|e| self.launch_error(&e))?;

        if output.success {
            Ok(output.stdout)
        } else {
            let command = display_command(&self.program, args);
            let stderr = redact_credentials(&output.stderr).into_owned();
            debug!(%command, stderr = %stderr.trim(), "git exited unsuccessfully");
            Err(GitError::CommandFailed { command, stderr })
        }
    }

    /// Checks that git can be executed, returning its version line.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotInstalled`] when git is absent, and
    /// [`GitError::Launch`] when it runs but cannot report a version.
    pub fn ensure_installed(&self, cwd: &Path) -> Result<String, GitError> {
        match self.run(&["--version"], cwd) {
            Ok(version) => Ok(version.trim().to_string()),
            Err(GitError::CommandFailed { stderr, .. }) => Err(GitError::Launch {
                program: self.program.clone(),
                reason: stderr.trim().to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    fn launch_error(&self, err: &io::Error) -> GitError {
        if err.kind() == io::ErrorKind::NotFound {
            GitError::NotInstalled {
                program: self.program.clone(),
            }
        } else {
            GitError::Launch {
                program: self.program.clone(),
                reason: err.to_string(),
            }
        }
    }
}

/// Formats a command line for messages, e.g. `git commit -m msg`.
///
/// Credentials in URL arguments are masked.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(Cow::Borrowed(program))
        .chain(args.iter().map(|a| redact_credentials(a)))
        .collect::<Vec<_>>()
        .join(" ")
}
