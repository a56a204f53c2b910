//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Friendly front-end over the git command line.
///
/// Every operation runs the real `git` executable in the selected
/// repository path and shows what git printed.
#[derive(Parser, Debug)]
#[command(name = "gitbridge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to the interactive menu).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Repository path to work in.
    #[arg(short = 'C', long = "repo", global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show repository state, branch and remotes.
    Status {
        /// Print the status as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the full output of `git status`.
    GitStatus,

    /// Clone a repository.
    ///
    /// A stored GitHub token can be embedded into HTTPS GitHub URLs.
    Clone {
        /// Repository URL (asked for when omitted).
        url: Option<String>,

        /// Directory to clone into (defaults to the repository path).
        #[arg(long, value_name = "DIR")]
        into: Option<PathBuf>,

        /// Use the stored token without asking.
        #[arg(long, conflicts_with = "no_token")]
        use_token: bool,

        /// Never use the stored token.
        #[arg(long)]
        no_token: bool,
    },

    /// Initialize a repository in the repository path.
    Init,

    /// Stage all changes (`git add .`).
    Add,

    /// Commit staged changes.
    Commit {
        /// Commit message (asked for when omitted).
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Push to the upstream branch.
    Push,

    /// Pull from the upstream branch.
    Pull,

    /// Fetch from the remote.
    Fetch,

    /// Manage branches.
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },

    /// Configure git identity and an SSH key for GitHub.
    Setup {
        /// Value for `user.name` (asked for when omitted).
        #[arg(long)]
        name: Option<String>,

        /// Value for `user.email` (asked for when omitted).
        #[arg(long)]
        email: Option<String>,

        /// Skip SSH key generation and display.
        #[arg(long)]
        no_ssh: bool,

        /// Do not open the GitHub SSH keys page.
        #[arg(long)]
        no_browser: bool,
    },

    /// Show the commit graph with numbered, selectable commits.
    History {
        /// Show the commit with this number right away.
        #[arg(short, long, value_name = "N")]
        select: Option<usize>,
    },

    /// Show a commit (`git show <hash>`).
    Show {
        /// Commit hash.
        hash: String,
    },

    /// Preview README.md of the repository.
    Readme,

    /// Manage the stored GitHub personal access token.
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Interactive menu.
    Menu,

    /// Open the GitHub SSH keys page.
    Keys,

    /// About gitbridge.
    About,

    /// View or change configuration.
    Config {
        /// Configuration key, e.g. `setup.key_name`.
        key: Option<String>,

        /// New value for the key.
        value: Option<String>,

        /// List all configuration values.
        #[arg(short, long)]
        list: bool,
    },

    /// Check gitbridge installation and diagnose issues.
    Doctor,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Branch subcommands.
#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// List local branches.
    List,

    /// Create a branch and switch to it.
    New {
        /// Branch name (asked for when omitted).
        name: Option<String>,
    },

    /// Switch to an existing branch.
    Switch {
        /// Branch name (chosen from a list when omitted).
        name: Option<String>,
    },

    /// Delete a branch.
    Delete {
        /// Branch name (chosen from a list when omitted).
        name: Option<String>,

        /// Delete even if unmerged (`-D`).
        #[arg(short, long)]
        force: bool,
    },
}

/// Token subcommands.
#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Store a token in the system keyring.
    Set {
        /// GitHub username the token belongs to.
        #[arg(long)]
        user: Option<String>,
    },

    /// Remove the stored token.
    Delete,

    /// Show whether a token is stored.
    Status,
}

/// Supported shell types for completions.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

/// How the stored token is used for a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenChoice {
    Ask,
    Always,
    Never,
}

impl TokenChoice {
    /// From the `--use-token` / `--no-token` flags.
    #[must_use]
    pub const fn from_flags(use_token: bool, no_token: bool) -> Self {
        if use_token {
            Self::Always
        } else if no_token {
            Self::Never
        } else {
            Self::Ask
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["gitbridge"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_repo_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["gitbridge", "status", "-C", "/work/repo"]).unwrap();
        assert_eq!(cli.repo, Some(PathBuf::from("/work/repo")));
        assert!(matches!(cli.command, Some(Commands::Status { json: false })));
    }

    #[test]
    fn token_flags_conflict() {
        let result = Cli::try_parse_from([
            "gitbridge",
            "clone",
            "https://github.com/u/r.git",
            "--use-token",
            "--no-token",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn token_choice_from_flags() {
        assert_eq!(TokenChoice::from_flags(true, false), TokenChoice::Always);
        assert_eq!(TokenChoice::from_flags(false, true), TokenChoice::Never);
        assert_eq!(TokenChoice::from_flags(false, false), TokenChoice::Ask);
    }

    #[test]
    fn branch_delete_force() {
        let cli = Cli::try_parse_from(["gitbridge", "branch", "delete", "old", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Branch {
                command: BranchCommands::Delete { name, force },
            }) => {
                assert_eq!(name.as_deref(), Some("old"));
                assert!(force);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
