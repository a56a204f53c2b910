//! Application layer: state passed to handlers, the output log, prompts and
//! the menu table.

pub mod log;
pub mod menu;
pub mod prompt;
pub mod state;

pub use log::{LogLevel, OutputLog};
pub use menu::MenuAction;
pub use prompt::{Prompter, StdinPrompter};
pub use state::AppState;
