//! Command implementations.
//!
//! Handlers take the [`AppState`](crate::app::AppState) explicitly and write
//! user-facing output through its log.

pub mod branch;
pub mod history;
pub mod menu;
pub mod misc;
pub mod repo;
pub mod setup;
pub mod token;

pub use history::{handle_history, handle_show};
pub use menu::handle_menu;
pub use misc::{
    handle_about, handle_completions, handle_config, handle_doctor, handle_keys, handle_readme,
};
pub use repo::{
    handle_add, handle_clone, handle_commit, handle_fetch, handle_git_status, handle_init,
    handle_pull, handle_push, handle_status,
};
pub use setup::{handle_setup, SetupOptions};
