//! External process execution.
//!
//! Every git and ssh-keygen call goes through [`CommandRunner`] so command
//! handlers can be exercised against a mock instead of real binaries.

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::auth::redact_credentials;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful result with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given stderr.
    #[must_use]
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs external programs synchronously.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs `program` with `args` in `cwd` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns the spawn error when the program cannot be started (for
    /// example [`io::ErrorKind::NotFound`] when it is not installed). A
    /// non-zero exit is not an error here; it is reported through
    /// [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput> {
        let shown: Vec<_> = args.iter().map(|a| redact_credentials(a)).collect();
        debug!(program, args = ?shown, cwd = %cwd.display(), "running external command");

        let output = Command::new(program).args(args).current_dir(cwd).output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
