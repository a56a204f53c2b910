//! gitbridge - friendly front-end over the git command line
//!
//! Clone, commit, push, manage branches, set up an SSH key for GitHub and
//! browse history, all by running the real `git` executable in a selected
//! directory and showing what it printed.

mod app;
mod auth;
mod cli;
mod config;
mod error;
mod git;
mod process;
mod readme;

use std::io::IsTerminal;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::{AppState, OutputLog, StdinPrompter};
use crate::auth::{KeyringStore, SecretStore};
use crate::cli::commands::{self, branch, token, SetupOptions};
use crate::cli::{BranchCommands, Cli, Commands, TokenChoice, TokenCommands};
use crate::config::settings::env;
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::process::SystemRunner;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the command
    if let Err(e) = run(cli) {
        // Git's stderr has already been printed through the output log.
        if !e.is_command_failure() {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config()?;
    let repo_path = match cli.repo.clone().or_else(|| config.repo.default_path.clone()) {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let command = cli.command.unwrap_or(Commands::Menu);

    // Commands that work without git.
    match command {
        Commands::About => return commands::handle_about(),
        Commands::Completions { shell } => return commands::handle_completions(shell),
        Commands::Config { key, value, list } => {
            return commands::handle_config(&config::config_file()?, key, value, list)
        }
        Commands::Doctor => {
            let store = KeyringStore::new(&config.credentials);
            return commands::handle_doctor(
                SystemRunner,
                &config,
                &repo_path,
                store.as_ref().map(|s| s as &dyn SecretStore),
            );
        }
        _ => {}
    }

    let mut app = AppState::new(
        SystemRunner,
        config,
        repo_path,
        Box::new(StdinPrompter::new(cli.yes)),
        OutputLog::echoing(),
    )?;

    dispatch(&mut app, command)
}

/// Opens the keyring, degrading to `None` so clone and the menu keep working.
fn open_secrets(config: &BridgeConfig) -> Option<KeyringStore> {
    match KeyringStore::new(&config.credentials) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "credential storage unavailable");
            None
        }
    }
}

fn dispatch(app: &mut AppState<SystemRunner>, command: Commands) -> Result<()> {
    match command {
        Commands::Status { json } => commands::handle_status(app, json),
        Commands::GitStatus => commands::handle_git_status(app),
        Commands::Clone {
            url,
            into,
            use_token,
            no_token,
        } => {
            let secrets = open_secrets(&app.config);
            commands::handle_clone(
                app,
                secrets.as_ref().map(|s| s as &dyn SecretStore),
                url,
                into,
                TokenChoice::from_flags(use_token, no_token),
            )
        }
        Commands::Init => commands::handle_init(app),
        Commands::Add => commands::handle_add(app),
        Commands::Commit { message } => commands::handle_commit(app, message),
        Commands::Push => commands::handle_push(app),
        Commands::Pull => commands::handle_pull(app),
        Commands::Fetch => commands::handle_fetch(app),
        Commands::Branch { command } => match command {
            BranchCommands::List => branch::handle_list(app),
            BranchCommands::New { name } => branch::handle_new(app, name),
            BranchCommands::Switch { name } => branch::handle_switch(app, name),
            BranchCommands::Delete { name, force } => branch::handle_delete(app, name, force),
        },
        Commands::Setup {
            name,
            email,
            no_ssh,
            no_browser,
        } => {
            let options = SetupOptions {
                name,
                email,
                no_ssh,
                no_browser,
            };
            commands::handle_setup(app, options, &config::paths::ssh_dir()?)
        }
        Commands::History { select } => {
            commands::handle_history(app, select, std::io::stdin().is_terminal())
        }
        Commands::Show { hash } => commands::handle_show(app, &hash),
        Commands::Readme => commands::handle_readme(app),
        Commands::Token { command } => {
            let store = KeyringStore::new(&app.config.credentials)?;
            match command {
                TokenCommands::Set { user } => token::handle_set(app, &store, user),
                TokenCommands::Delete => token::handle_delete(app, &store),
                TokenCommands::Status => token::handle_status(app, &store),
            }
        }
        Commands::Menu => {
            let secrets = open_secrets(&app.config);
            let ssh_dir = config::paths::ssh_dir()
                .inspect_err(|e| warn!(error = %e, "first-time setup unavailable"))
                .ok();
            commands::handle_menu(
                app,
                secrets.as_ref().map(|s| s as &dyn SecretStore),
                ssh_dir.as_deref(),
            )
        }
        Commands::Keys => commands::handle_keys(app),
        Commands::About
        | Commands::Completions { .. }
        | Commands::Config { .. }
        | Commands::Doctor => Ok(()),
    }
}
