//! CLI module for gitbridge.

pub mod args;
pub mod commands;

pub use args::{BranchCommands, Cli, Commands, ShellType, TokenChoice, TokenCommands};
