//! Repository status classification.
//!
//! A path is a repository when it contains a `.git` directory. For a
//! repository, the lines of `git status --porcelain` decide the state:
//! no lines is clean, any line starting with `U` means unmerged paths,
//! anything else is uncommitted work.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name of the version-control metadata directory.
pub const METADATA_DIR: &str = ".git";

/// Overall state of the selected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoState {
    /// Nothing to commit.
    Clean,
    /// Changes present, none of them conflicted.
    Uncommitted,
    /// At least one unmerged path.
    Conflicts,
    /// No `.git` directory at the path.
    NotARepository,
}

impl RepoState {
    /// Human-readable label shown next to the indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Uncommitted => "Uncommitted changes",
            Self::Conflicts => "Conflicts present",
            Self::NotARepository => "Not a Git repository",
        }
    }

    /// Indicator colour for the state.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Clean => "green",
            Self::Uncommitted => "yellow",
            Self::Conflicts => "red",
            Self::NotARepository => "gray",
        }
    }
}

impl fmt::Display for RepoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks whether `path` holds a `.git` directory.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(METADATA_DIR).is_dir()
}

/// Classifies `git status --porcelain` output.
#[must_use]
pub fn classify(porcelain: &str) -> RepoState {
    let mut lines = porcelain.lines().filter(|l| !l.trim().is_empty()).peekable();

    if lines.peek().is_none() {
        return RepoState::Clean;
    }
    if lines.any(|l| l.starts_with('U')) {
        RepoState::Conflicts
    } else {
        RepoState::Uncommitted
    }
}

/// Status view of the selected path at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSnapshot {
    /// The selected path.
    pub path: PathBuf,
    /// Classified state.
    pub state: RepoState,
    /// Current branch; `None` when it could not be determined.
    pub branch: Option<String>,
    /// Lines of `git remote -v`.
    pub remotes: Vec<String>,
}

impl RepoSnapshot {
    /// Snapshot for a path without a `.git` directory.
    #[must_use]
    pub const fn not_a_repository(path: PathBuf) -> Self {
        Self {
            path,
            state: RepoState::NotARepository,
            branch: None,
            remotes: Vec::new(),
        }
    }

    /// Whether the snapshot describes a repository.
    #[must_use]
    pub fn is_repository(&self) -> bool {
        self.state != RepoState::NotARepository
    }
}

impl fmt::Display for RepoSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path:    {}", self.path.display())?;
        writeln!(f, "Status:  {} ({})", self.state, self.state.color())?;

        if !self.is_repository() {
            writeln!(f, "Branch:  -")?;
            return write!(f, "Remotes: -");
        }

        writeln!(f, "Branch:  {}", self.branch.as_deref().unwrap_or("N/A"))?;
        if self.remotes.is_empty() {
            write!(f, "Remotes: None")
        } else {
            write!(f, "Remotes:")?;
            for remote in &self.remotes {
                write!(f, "\n  {remote}")?;
            }
            Ok(())
        }
    }
}
