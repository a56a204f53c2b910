//! Help menu, README preview and installation commands.

use std::fmt;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::app::AppState;
use crate::auth::SecretStore;
use crate::cli::args::{Cli, ShellType};
use crate::config::{self, BridgeConfig};
use crate::error::{BridgeError, Result};
use crate::git::status::is_repository;
use crate::git::GitCli;
use crate::process::CommandRunner;
use crate::readme;

/// Opens `url` in the default browser.
pub fn open_browser(url: &str) -> Result<()> {
    debug!(%url, "opening browser");
    open::that(url).map_err(|e| BridgeError::Browser {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Handles `gitbridge keys`.
pub fn handle_keys<R: CommandRunner>(app: &mut AppState<R>) -> Result<()> {
    let url = app.config.setup.keys_url.clone();
    open_browser(&url)?;
    app.log.info("Opened GitHub SSH keys page.");
    Ok(())
}

/// Text of the About box.
#[must_use]
pub fn about_text() -> String {
    format!(
        "gitbridge {}\nFriendly front-end over the git command line.\n\
         Every operation runs the real git executable and shows its output.",
        env!("CARGO_PKG_VERSION")
    )
}

/// Handles `gitbridge about`.
pub fn handle_about() -> Result<()> {
    println!("{}", about_text());
    Ok(())
}

/// Handles `gitbridge readme`.
pub fn handle_readme<R: CommandRunner>(app: &mut AppState<R>) -> Result<()> {
    match readme::load(app.repo_path())? {
        Some(markdown) => app.log.info(readme::render(&markdown)),
        None => app.log.info(readme::NO_README),
    }
    Ok(())
}

/// Handles the `gitbridge completions <shell>` command.
///
/// Generates shell completion scripts.
pub fn handle_completions(shell: ShellType) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
    };

    generate(shell, &mut cmd, "gitbridge", &mut io::stdout());

    Ok(())
}

/// Result of one doctor check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Ok(String),
    NotApplicable(String),
    Error(String),
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(detail) => write!(f, "OK ({detail})"),
            Self::NotApplicable(detail) => write!(f, "N/A ({detail})"),
            Self::Error(detail) => write!(f, "ERROR - {detail}"),
        }
    }
}

/// Runs every doctor check without printing.
pub fn diagnose<R: CommandRunner>(
    runner: R,
    config: &BridgeConfig,
    repo: &Path,
    store: std::result::Result<&dyn SecretStore, &BridgeError>,
) -> Vec<(&'static str, CheckStatus)> {
    let mut checks = Vec::new();

    let status = match config::paths::config_file() {
        Ok(path) if path.exists() => match config::read_config(&path) {
            Ok(_) => CheckStatus::Ok(path.display().to_string()),
            Err(e) => CheckStatus::Error(e.to_string()),
        },
        Ok(path) => CheckStatus::NotApplicable(format!("defaults, no {}", path.display())),
        Err(e) => CheckStatus::Error(e.to_string()),
    };
    checks.push(("Configuration", status));

    let cwd = if repo.is_dir() { repo } else { Path::new(".") };
    let keygen = config.git.ssh_keygen.clone();
    let git = GitCli::new(runner, config.git.program.clone());
    let status = match git.ensure_installed(cwd) {
        Ok(version) => CheckStatus::Ok(version),
        Err(e) => CheckStatus::Error(e.to_string()),
    };
    checks.push(("Git", status));

    // ssh-keygen has no version flag; a usage error still proves it runs.
    let status = match git.runner().run(&keygen, &["-?".to_string()], cwd) {
        Ok(_) => CheckStatus::Ok(keygen),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            CheckStatus::Error(format!("{keygen} not found"))
        }
        Err(e) => CheckStatus::Error(e.to_string()),
    };
    checks.push(("ssh-keygen", status));

    let status = match store.map(|s| s.load()) {
        Ok(Ok(Some(_))) => CheckStatus::Ok("token stored".to_string()),
        Ok(Ok(None)) => CheckStatus::NotApplicable("no token stored".to_string()),
        Ok(Err(e)) => CheckStatus::Error(e.to_string()),
        Err(e) => CheckStatus::Error(e.to_string()),
    };
    checks.push(("Credential storage", status));

    let status = if !repo.is_dir() {
        CheckStatus::Error(format!("{} is not a valid directory", repo.display()))
    } else if is_repository(repo) {
        CheckStatus::Ok(format!("git repository at {}", repo.display()))
    } else {
        CheckStatus::NotApplicable(format!("{} is not a git repository", repo.display()))
    };
    checks.push(("Selected path", status));

    checks
}

/// Handles the `gitbridge doctor` command.
///
/// Checks gitbridge installation and diagnoses issues. Works without git.
pub fn handle_doctor<R: CommandRunner>(
    runner: R,
    config: &BridgeConfig,
    repo: &Path,
    store: std::result::Result<&dyn SecretStore, &BridgeError>,
) -> Result<()> {
    println!("gitbridge doctor\n");

    let checks = diagnose(runner, config, repo, store);
    for (name, status) in &checks {
        println!("  {name}: {status}");
    }

    let issues = checks
        .iter()
        .filter(|(_, s)| matches!(s, CheckStatus::Error(_)))
        .count();
    println!();
    if issues == 0 {
        println!("All checks passed!");
    } else {
        println!("{issues} issue(s) found.");
    }

    Ok(())
}

/// Handles the `gitbridge config` command.
///
/// Views or modifies the configuration file at `path`.
pub fn handle_config(
    path: &Path,
    key: Option<String>,
    value: Option<String>,
    list: bool,
) -> Result<()> {
    let mut config = config::read_config(path)?;

    match (key, value) {
        (Some(key), Some(value)) if !list => {
            config.set(&key, &value)?;
            config::save_config_to(&config, path)?;
            println!("{key} = {}", config.get(&key).unwrap_or_default());
        }
        (Some(key), None) if !list => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => {
                return Err(BridgeError::Config(format!(
                    "Unknown configuration key: {key}. Available keys: {}",
                    BridgeConfig::KEYS.join(", ")
                )))
            }
        },
        _ => {
            println!("Current configuration:\n");
            for key in BridgeConfig::KEYS {
                println!("  {key} = {}", config.get(key).unwrap_or_default());
            }
            println!();
            println!("Config file: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::log::LogLevel;
    use crate::app::prompt::MockPrompter;
    use crate::app::state::testing::{recording, state_in};
    use crate::auth::credentials::MockSecretStore;
    use crate::process::{CommandOutput, MockCommandRunner};

    #[test]
    fn readme_is_rendered_into_the_log() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Demo\n\nHello.\n").unwrap();
        let (_, runner) = recording();
        let mut app = state_in(dir.path(), runner, MockPrompter::new());

        handle_readme(&mut app).unwrap();
        assert!(app.log.contains(LogLevel::Info, "Demo\n===="));
    }

    #[test]
    fn missing_readme_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut app = state_in(dir.path(), runner, MockPrompter::new());

        handle_readme(&mut app).unwrap();
        assert!(app.log.contains(LogLevel::Info, readme::NO_README));
    }

    #[test]
    fn about_names_the_version() {
        assert!(about_text().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn doctor_reports_missing_git() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|program, _, _| {
            if program == "git" {
                Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
            } else {
                Ok(CommandOutput::failed("usage: ssh-keygen"))
            }
        });
        let mut store = MockSecretStore::new();
        store.expect_load().returning(|| Ok(None));

        let checks = diagnose(runner, &BridgeConfig::default(), dir.path(), Ok(&store));
        let find = |name: &str| checks.iter().find(|(n, _)| *n == name).unwrap().1.clone();

        assert!(matches!(find("Git"), CheckStatus::Error(_)));
        assert!(matches!(find("ssh-keygen"), CheckStatus::Ok(_)));
        assert!(matches!(find("Credential storage"), CheckStatus::NotApplicable(_)));
        assert!(matches!(find("Selected path"), CheckStatus::NotApplicable(_)));
    }

    #[test]
    fn doctor_reports_unavailable_keyring() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_, _, _| Ok(CommandOutput::ok("git version 2.45.1\n")));
        let err = BridgeError::CredentialStorage("no secret service".to_string());

        let checks = diagnose(runner, &BridgeConfig::default(), dir.path(), Err(&err));
        let (_, keyring) = checks
            .iter()
            .find(|(n, _)| *n == "Credential storage")
            .unwrap();
        assert!(keyring.to_string().starts_with("ERROR - "));
    }

    #[test]
    fn config_set_persists_and_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        handle_config(&path, Some("setup.key_name".into()), Some("id_work".into()), false)
            .unwrap();
        assert_eq!(config::read_config(&path).unwrap().setup.key_name, "id_work");

        let err = handle_config(&path, Some("nope".into()), None, false).unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }
}
