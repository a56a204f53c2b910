//! Interactive menu loop.
//!
//! Selections are dispatched through the same handlers as the subcommands.
//! Failures are reported and the loop keeps going; only fatal errors (git
//! disappearing) end it early. Log entries are printed in one timestamped
//! batch after each selection.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{branch, history, misc, repo, setup, token};
use crate::app::log::LogLevel;
use crate::app::menu::{self, MenuAction};
use crate::app::prompt::non_empty;
use crate::app::AppState;
use crate::auth::SecretStore;
use crate::cli::args::TokenChoice;
use crate::error::{BridgeError, Result};
use crate::process::CommandRunner;

/// Handles `gitbridge menu` (and running without a subcommand).
///
/// `secrets` is `None` when the keyring could not be opened, `ssh_dir` when
/// the home directory is unknown.
///
/// # Errors
///
/// Returns fatal errors only; everything else is logged.
pub fn handle_menu<R: CommandRunner>(
    app: &mut AppState<R>,
    secrets: Option<&dyn SecretStore>,
    ssh_dir: Option<&Path>,
) -> Result<()> {
    app.log.set_echo(false);
    let mut printed = app.log.entries().len();

    let outcome = loop {
        printed = print_new_entries(app, printed);

        match app.snapshot() {
            Ok(snapshot) => println!("\n{snapshot}\n"),
            Err(e) if e.is_fatal() => break Err(e),
            Err(e) => app.log.error(e.to_string()),
        }
        println!("{}", menu::render());

        let Some(line) = app.prompt.ask("gitbridge>")? else {
            break Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (selection, argument) = match line.split_once(char::is_whitespace) {
            Some((s, rest)) => (s, non_empty(Some(rest.to_string()))),
            None => (line, None),
        };

        let Some(action) = menu::find(selection) else {
            app.log.error(format!("Unknown selection: {selection}"));
            continue;
        };
        debug!(?action, "menu selection");
        if action == MenuAction::Exit {
            break Ok(());
        }

        if let Err(e) = dispatch(app, action, argument, secrets, ssh_dir) {
            if e.is_fatal() {
                break Err(e);
            }
            // Git's own stderr is already in the log.
            if !e.is_command_failure() {
                app.log.error(e.to_string());
            }
        }
    };

    print_new_entries(app, printed);
    outcome
}

/// Prints log entries from `start` on and returns the new end.
fn print_new_entries<R: CommandRunner>(app: &AppState<R>, start: usize) -> usize {
    for entry in app.log.since(start) {
        match entry.level {
            LogLevel::Info => println!("{entry}"),
            LogLevel::Error => eprintln!("{entry}"),
        }
    }
    app.log.entries().len()
}

fn require(secrets: Option<&dyn SecretStore>) -> Result<&dyn SecretStore> {
    secrets.ok_or_else(|| BridgeError::CredentialStorage("keyring unavailable".to_string()))
}

/// Runs one menu action. `argument` is any text typed after the selection.
fn dispatch<R: CommandRunner>(
    app: &mut AppState<R>,
    action: MenuAction,
    argument: Option<String>,
    secrets: Option<&dyn SecretStore>,
    ssh_dir: Option<&Path>,
) -> Result<()> {
    match action {
        MenuAction::Clone => repo::handle_clone(app, secrets, argument, None, TokenChoice::Ask),
        MenuAction::Init => repo::handle_init(app),
        MenuAction::Add => repo::handle_add(app),
        MenuAction::Commit => repo::handle_commit(app, argument),
        MenuAction::Push => repo::handle_push(app),
        MenuAction::Pull => repo::handle_pull(app),
        MenuAction::Fetch => repo::handle_fetch(app),
        MenuAction::Status => app.refresh().map(|_| ()),
        MenuAction::GitStatus => repo::handle_git_status(app),
        MenuAction::ChangePath => {
            let path = match argument {
                Some(p) => Some(p),
                None => non_empty(app.prompt.ask("Repository path?")?),
            };
            if let Some(path) = path {
                app.select_path(PathBuf::from(path))?;
                app.refresh()?;
            }
            Ok(())
        }
        MenuAction::ListBranches => branch::handle_list(app),
        MenuAction::NewBranch => branch::handle_new(app, argument),
        MenuAction::SwitchBranch => branch::handle_switch(app, argument),
        MenuAction::DeleteBranch => branch::handle_delete(app, argument, false),
        MenuAction::FirstTimeSetup => match ssh_dir {
            Some(dir) => setup::handle_setup(app, setup::SetupOptions::default(), dir),
            None => Err(BridgeError::Config(
                "Cannot determine home directory; first-time setup is unavailable".to_string(),
            )),
        },
        MenuAction::SetToken => token::handle_set(app, require(secrets)?, argument),
        MenuAction::DeleteToken => token::handle_delete(app, require(secrets)?),
        MenuAction::TokenStatus => token::handle_status(app, require(secrets)?),
        MenuAction::History => history::handle_history(app, None, true),
        MenuAction::ShowCommit => {
            let hash = match argument {
                Some(h) => Some(h),
                None => non_empty(app.prompt.ask("Commit hash?")?),
            };
            match hash {
                Some(hash) => history::handle_show(app, &hash),
                None => Ok(()),
            }
        }
        MenuAction::Readme => misc::handle_readme(app),
        MenuAction::About => {
            app.log.info(misc::about_text());
            Ok(())
        }
        MenuAction::SshKeys => misc::handle_keys(app),
        MenuAction::Exit | MenuAction::Separator => Ok(()),
    }
}
