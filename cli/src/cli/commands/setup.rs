//! First-time git identity and SSH key setup.
//!
//! The workflow:
//! 1. Ask for name and email and store them with `git config --global`
//! 2. Generate an ed25519 key under `~/.ssh` unless one exists
//! 3. Show the public key and open the GitHub page where it gets registered

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::misc::open_browser;
use crate::app::prompt::non_empty;
use crate::app::AppState;
use crate::error::Result;
use crate::process::CommandRunner;

/// Answers given on the command line instead of prompts.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub name: Option<String>,
    pub email: Option<String>,
    pub no_ssh: bool,
    pub no_browser: bool,
}

/// Handles `gitbridge setup`.
///
/// `ssh_dir` is where the key pair lives, normally `~/.ssh`.
///
/// # Errors
///
/// Returns an error if a `git config` call fails or the SSH directory
/// cannot be created.
pub fn handle_setup<R: CommandRunner>(
    app: &mut AppState<R>,
    options: SetupOptions,
    ssh_dir: &Path,
) -> Result<()> {
    app.log.info("Starting first-time Git + GitHub setup...");

    let name = answer(app, options.name, "Your name for git commits?")?;
    let email = answer(app, options.email, "Your email for git commits?")?;
    let (Some(name), Some(email)) = (name, email) else {
        app.log.info("Git identity setup canceled.");
        return Ok(());
    };

    // `--global` ignores the working directory, but it must exist.
    let home = ssh_dir
        .parent()
        .filter(|dir| dir.is_dir())
        .map_or_else(|| app.repo_path().to_path_buf(), Path::to_path_buf);
    app.run_git_in(&["config", "--global", "user.name", &name], &home)?;
    app.run_git_in(&["config", "--global", "user.email", &email], &home)?;
    app.log
        .info(format!("Git identity configured: {name} <{email}>"));

    if options.no_ssh {
        return Ok(());
    }

    let key = ssh_dir.join(&app.config.setup.key_name);
    let public = public_key_path(&key);
    if public.exists() {
        app.log.info("Existing SSH key detected.");
    } else {
        if !app.prompt.confirm("No SSH key found. Generate a new one?")? {
            return Ok(());
        }
        if !generate_key(app, &key, &email)? {
            return Ok(());
        }
    }

    match fs::read_to_string(&public) {
        Ok(text) => {
            app.log.info("Your public SSH key (add it to GitHub):");
            app.log.info(text);
        }
        Err(e) => app
            .log
            .error(format!("Could not read {}: {e}", public.display())),
    }

    if !options.no_browser {
        let url = app.config.setup.keys_url.clone();
        open_browser(&url)?;
        app.log.info("Opened GitHub SSH keys page.");
    }
    Ok(())
}

fn answer<R: CommandRunner>(
    app: &mut AppState<R>,
    given: Option<String>,
    question: &str,
) -> Result<Option<String>> {
    match given {
        Some(value) => Ok(non_empty(Some(value))),
        None => Ok(non_empty(app.prompt.ask(question)?)),
    }
}

/// `<key>.pub`
fn public_key_path(key: &Path) -> PathBuf {
    let mut name = key.as_os_str().to_os_string();
    name.push(".pub");
    PathBuf::from(name)
}

/// Runs ssh-keygen for `key`. Returns `false` when generation failed; the
/// reason is already in the log.
fn generate_key<R: CommandRunner>(app: &mut AppState<R>, key: &Path, email: &str) -> Result<bool> {
    let Some(dir) = key.parent() else {
        return Ok(false);
    };
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }

    let program = app.config.git.ssh_keygen.clone();
    let args: Vec<String> = [
        "-t",
        "ed25519",
        "-C",
        email,
        "-f",
        &key.display().to_string(),
        "-N",
        "",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let reason = match app.git().runner().run(&program, &args, dir) {
        Ok(output) if output.success => {
            info!(key = %key.display(), "ssh key generated");
            app.log.info(output.stdout);
            return Ok(true);
        }
        Ok(output) => output.stderr.trim().to_string(),
        Err(e) => e.to_string(),
    };

    warn!(program = %program, %reason, "ssh-keygen failed");
    app.log.error(format!("Error generating SSH key: {reason}"));
    Ok(false)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::app::log::LogLevel;
    use crate::app::prompt::MockPrompter;
    use crate::app::state::testing::{called, called_verb, recording, runner_with, state_in, Calls};
    use crate::process::CommandOutput;

    fn options(name: &str, email: &str) -> SetupOptions {
        SetupOptions {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            no_ssh: false,
            no_browser: true,
        }
    }

    /// Records git calls; ssh-keygen writes the public key it was asked for.
    fn keygen_runner(calls: &Calls) -> crate::process::MockCommandRunner {
        let seen = std::sync::Arc::clone(calls);
        runner_with(move |args, _| {
            seen.lock().unwrap().push(args.to_vec());
            if args[0] == "-t" {
                let key = &args[5];
                fs::write(format!("{key}.pub"), "ssh-ed25519 AAAAC3Nza dev@example.com\n")
                    .unwrap();
            }
            CommandOutput::ok("")
        })
    }

    #[test]
    fn sets_identity_and_generates_key() {
        let home = tempfile::tempdir().unwrap();
        let ssh = home.path().join(".ssh");
        let calls = Calls::default();
        let mut prompt = MockPrompter::new();
        prompt
            .expect_confirm()
            .with(eq("No SSH key found. Generate a new one?"))
            .returning(|_| Ok(true));
        let mut app = state_in(home.path(), keygen_runner(&calls), prompt);

        handle_setup(&mut app, options("Dev", "dev@example.com"), &ssh).unwrap();

        assert!(called(&calls, &["config", "--global", "user.name", "Dev"]));
        assert!(called(&calls, &["config", "--global", "user.email", "dev@example.com"]));
        let key = ssh.join("id_ed25519").display().to_string();
        assert!(called(
            &calls,
            &["-t", "ed25519", "-C", "dev@example.com", "-f", &key, "-N", ""]
        ));
        assert!(app.log.contains(LogLevel::Info, "ssh-ed25519 AAAAC3Nza"));
    }

    #[test]
    fn existing_key_is_reused() {
        let home = tempfile::tempdir().unwrap();
        let ssh = home.path().join(".ssh");
        fs::create_dir_all(&ssh).unwrap();
        fs::write(ssh.join("id_ed25519.pub"), "ssh-ed25519 EXISTING me\n").unwrap();
        let calls = Calls::default();
        let mut app = state_in(home.path(), keygen_runner(&calls), MockPrompter::new());

        handle_setup(&mut app, options("Dev", "dev@example.com"), &ssh).unwrap();

        assert!(!called_verb(&calls, "-t"));
        assert!(app.log.contains(LogLevel::Info, "Existing SSH key detected."));
        assert!(app.log.contains(LogLevel::Info, "EXISTING"));
    }

    #[test]
    fn empty_identity_cancels() {
        let home = tempfile::tempdir().unwrap();
        let (calls, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt
            .expect_ask()
            .with(eq("Your email for git commits?"))
            .returning(|_| Ok(Some(String::new())));
        let mut app = state_in(home.path(), runner, prompt);

        let opts = SetupOptions {
            name: Some("Dev".to_string()),
            ..SetupOptions::default()
        };
        handle_setup(&mut app, opts, &home.path().join(".ssh")).unwrap();

        assert!(calls.lock().unwrap().is_empty());
        assert!(app.log.contains(LogLevel::Info, "Git identity setup canceled."));
    }

    #[test]
    fn keygen_failure_stops_the_workflow() {
        let home = tempfile::tempdir().unwrap();
        let ssh = home.path().join(".ssh");
        let runner = runner_with(|args, _| {
            if args[0] == "-t" {
                CommandOutput::failed("Saving key failed: Permission denied")
            } else {
                CommandOutput::ok("")
            }
        });
        let mut prompt = MockPrompter::new();
        prompt.expect_confirm().returning(|_| Ok(true));
        let mut app = state_in(home.path(), runner, prompt);

        handle_setup(&mut app, options("Dev", "dev@example.com"), &ssh).unwrap();

        assert!(app
            .log
            .contains(LogLevel::Error, "Error generating SSH key: Saving key failed"));
        assert!(!app.log.contains(LogLevel::Info, "public SSH key"));
    }

    #[test]
    fn no_ssh_stops_after_identity() {
        let home = tempfile::tempdir().unwrap();
        let (calls, runner) = recording();
        let mut app = state_in(home.path(), runner, MockPrompter::new());

        let opts = SetupOptions {
            no_ssh: true,
            ..options("Dev", "dev@example.com")
        };
        handle_setup(&mut app, opts, &home.path().join(".ssh")).unwrap();

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert!(!home.path().join(".ssh").exists());
    }

    #[test]
    fn public_key_path_appends_suffix() {
        assert_eq!(
            public_key_path(Path::new("/home/dev/.ssh/id_ed25519")),
            PathBuf::from("/home/dev/.ssh/id_ed25519.pub")
        );
    }

    #[test]
    fn relative_ssh_dir_runs_git_config_in_selected_path() {
        let dir = tempfile::tempdir().unwrap();
        let cwds = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = std::sync::Arc::clone(&cwds);
        let runner = runner_with(move |_, cwd| {
            seen.lock().unwrap().push(cwd.to_path_buf());
            CommandOutput::ok("")
        });
        let mut app = state_in(dir.path(), runner, MockPrompter::new());
        let options = SetupOptions {
            no_ssh: true,
            ..options("Dev", "dev@example.com")
        };

        handle_setup(&mut app, options, Path::new(".ssh")).unwrap();

        let cwds = cwds.lock().unwrap();
        assert_eq!(cwds.len(), 2);
        assert!(cwds.iter().all(|cwd| cwd == dir.path()));
    }
}
