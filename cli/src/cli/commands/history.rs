//! Commit history and `git show`.

use tracing::debug;

use crate::app::prompt::non_empty;
use crate::app::AppState;
use crate::error::{BridgeError, Result};
use crate::git::history::LOG_ARGS;
use crate::git::History;
use crate::process::CommandRunner;

/// Handles `gitbridge history`.
///
/// Prints the graph log with numbered entries. `select` shows that entry
/// right away; otherwise, when `interactive`, the user can pick one.
///
/// # Errors
///
/// Returns [`BridgeError::NoSuchHistoryEntry`] for a number outside the
/// list, [`BridgeError::InvalidHistorySelection`] for a pick that is not a
/// number, or the error of the underlying git call.
pub fn handle_history<R: CommandRunner>(
    app: &mut AppState<R>,
    select: Option<usize>,
    interactive: bool,
) -> Result<()> {
    let output = app.query_git(&LOG_ARGS)?;
    let history = History::parse(&output);

    if history.is_empty() {
        app.log.info("No commits yet.");
        return Ok(());
    }
    app.log.info(history.render());

    let number = match select {
        Some(n) => Some(n),
        None if interactive && history.links().next().is_some() => {
            let answer = non_empty(app.prompt.ask("Show commit number (empty to skip)?")?);
            match answer {
                Some(a) => Some(
                    a.trim()
                        .parse()
                        .map_err(|_| BridgeError::InvalidHistorySelection(a.trim().to_string()))?,
                ),
                None => None,
            }
        }
        None => None,
    };
    let Some(number) = number else {
        return Ok(());
    };

    let hash = history
        .link(number)
        .ok_or(BridgeError::NoSuchHistoryEntry(number))?
        .to_string();
    handle_show(app, &hash)
}

/// Handles `gitbridge show`.
///
/// # Errors
///
/// Returns [`BridgeError::EmptyDiff`] when git prints nothing or fails.
pub fn handle_show<R: CommandRunner>(app: &mut AppState<R>, hash: &str) -> Result<()> {
    let output = match app.query_git(&["show", hash]) {
        Ok(out) => out,
        Err(e) if e.is_command_failure() => {
            debug!(error = %e, hash, "git show failed");
            String::new()
        }
        Err(e) => return Err(e),
    };

    if output.trim().is_empty() {
        return Err(BridgeError::EmptyDiff(hash.to_string()));
    }
    app.log.info(output);
    Ok(())
}
