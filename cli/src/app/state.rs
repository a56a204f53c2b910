//! Application state shared by every command handler.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::app::log::OutputLog;
use crate::app::prompt::Prompter;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::git::status::{classify, is_repository};
use crate::git::{GitCli, RepoSnapshot, RepoState};
use crate::process::CommandRunner;

/// Everything a handler needs: the selected path, git, config, prompts and
/// the output log.
pub struct AppState<R> {
    repo_path: PathBuf,
    git: GitCli<R>,
    pub config: BridgeConfig,
    pub prompt: Box<dyn Prompter>,
    pub log: OutputLog,
}

impl<R: CommandRunner> AppState<R> {
    /// Builds the state after checking that git can be executed.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`GitError::NotInstalled`](crate::git::GitError::NotInstalled) when git is missing.
    pub fn new(
        runner: R,
        config: BridgeConfig,
        repo_path: PathBuf,
        prompt: Box<dyn Prompter>,
        log: OutputLog,
    ) -> Result<Self> {
        let git = GitCli::new(runner, config.git.program.clone());

        let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
        let version = git.ensure_installed(&cwd)?;
        debug!(program = git.program(), %version, "git available");

        Ok(Self {
            repo_path,
            git,
            config,
            prompt,
            log,
        })
    }

    /// The currently selected path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// The git client.
    pub const fn git(&self) -> &GitCli<R> {
        &self.git
    }

    /// Changes the selected path after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPath`] and keeps the old path when
    /// `path` is not a directory.
    pub fn select_path(&mut self, path: PathBuf) -> Result<()> {
        ensure_dir(&path)?;
        info!(path = %path.display(), "selected repository path");
        self.repo_path = path;
        Ok(())
    }

    /// Runs git in the selected path, logging stdout or stderr.
    pub fn run_git(&mut self, args: &[&str]) -> Result<String> {
        let cwd = self.repo_path.clone();
        self.run_git_in(args, &cwd)
    }

    /// Runs git in `cwd`, logging stdout or stderr.
    pub fn run_git_in(&mut self, args: &[&str], cwd: &Path) -> Result<String> {
        match self.exec(args, cwd) {
            Ok(stdout) => {
                self.log.info(&stdout);
                Ok(stdout)
            }
            Err(e) => {
                if let Some(stderr) = e.git_stderr() {
                    self.log.error(stderr);
                }
                Err(e)
            }
        }
    }

    /// Runs git in the selected path without logging a successful result.
    /// Stderr of a failed query still goes to the log.
    pub fn query_git(&mut self, args: &[&str]) -> Result<String> {
        let cwd = self.repo_path.clone();
        self.exec(args, &cwd).inspect_err(|e| {
            if let Some(stderr) = e.git_stderr() {
                self.log.error(stderr);
            }
        })
    }

    fn exec(&self, args: &[&str], cwd: &Path) -> Result<String> {
        ensure_dir(cwd)?;
        Ok(self.git.run(args, cwd)?)
    }

    /// Queries state, branch and remotes of the selected path.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPath`] when the path is not a directory,
    /// and fatal git errors. Failed queries degrade to unknown values.
    pub fn snapshot(&mut self) -> Result<RepoSnapshot> {
        ensure_dir(&self.repo_path)?;
        let path = self.repo_path.clone();

        if !is_repository(&path) {
            return Ok(RepoSnapshot::not_a_repository(path));
        }

        let state = self
            .soft_query(&["status", "--porcelain"])?
            .map_or(RepoState::Clean, |out| classify(&out));

        let branch = self
            .soft_query(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let remotes = self
            .soft_query(&["remote", "-v"])?
            .map(|r| r.lines().map(str::to_string).collect())
            .unwrap_or_default();

        Ok(RepoSnapshot {
            path,
            state,
            branch,
            remotes,
        })
    }

    /// Runs a status query; command failures are logged and become `None`.
    fn soft_query(&mut self, args: &[&str]) -> Result<Option<String>> {
        match self.query_git(args) {
            Ok(out) => Ok(Some(out)),
            Err(e) if e.is_command_failure() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Refreshes the status view after an operation and logs a summary.
    pub fn refresh(&mut self) -> Result<RepoSnapshot> {
        let snapshot = self.snapshot()?;
        let branch = if snapshot.is_repository() {
            snapshot.branch.as_deref().unwrap_or("N/A")
        } else {
            "-"
        };
        self.log
            .info(format!("Status: {} | Branch: {branch}", snapshot.state));
        Ok(snapshot)
    }
}

/// Checks that `path` is an existing directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(BridgeError::InvalidPath(path.to_path_buf()))
    }
}
