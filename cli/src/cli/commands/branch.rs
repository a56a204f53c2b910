//! Branch command handlers.
//!
//! Names for switch and delete are only accepted when `git branch` lists
//! them, so a typo never reaches `git checkout` or `git branch -d`.

use tracing::info;

use crate::app::prompt::non_empty;
use crate::app::AppState;
use crate::error::Result;
use crate::git::BranchList;
use crate::process::CommandRunner;

const SWITCH_CANCELED: &str = "Branch switch canceled or invalid.";
const DELETE_CANCELED: &str = "Branch deletion canceled or invalid.";

/// Reads the local branches without logging git's raw output.
fn branches<R: CommandRunner>(app: &mut AppState<R>) -> Result<BranchList> {
    let output = app.query_git(&["branch"])?;
    Ok(BranchList::parse(&output))
}

/// Takes `name` when given, otherwise offers the branch list.
fn pick<R: CommandRunner>(
    app: &mut AppState<R>,
    list: &BranchList,
    name: Option<String>,
    title: &str,
) -> Result<Option<String>> {
    let name = match name {
        Some(name) => non_empty(Some(name)),
        None => non_empty(app.prompt.choose(title, list.names())?),
    };
    Ok(name.filter(|n| list.contains(n)))
}

/// Handles `gitbridge branch list`.
pub fn handle_list<R: CommandRunner>(app: &mut AppState<R>) -> Result<()> {
    let list = branches(app)?;
    if list.is_empty() {
        app.log.info("No branches yet.");
    } else {
        app.log.info(list.render());
    }
    Ok(())
}

/// Handles `gitbridge branch new`.
pub fn handle_new<R: CommandRunner>(app: &mut AppState<R>, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => non_empty(Some(name)),
        None => non_empty(app.prompt.ask("New branch name?")?),
    };
    let Some(name) = name else {
        return Ok(());
    };

    app.run_git(&["checkout", "-b", &name])?;
    info!(branch = %name, "branch created");
    app.refresh()?;
    Ok(())
}

/// Handles `gitbridge branch switch`.
pub fn handle_switch<R: CommandRunner>(app: &mut AppState<R>, name: Option<String>) -> Result<()> {
    let list = branches(app)?;
    let Some(name) = pick(app, &list, name, "Switch to branch:")? else {
        app.log.info(SWITCH_CANCELED);
        return Ok(());
    };

    app.run_git(&["checkout", &name])?;
    app.refresh()?;
    Ok(())
}

/// Handles `gitbridge branch delete`.
///
/// Asks for confirmation, then whether to force the deletion unless
/// `force` already says so.
pub fn handle_delete<R: CommandRunner>(
    app: &mut AppState<R>,
    name: Option<String>,
    force: bool,
) -> Result<()> {
    let list = branches(app)?;
    let Some(name) = pick(app, &list, name, "Delete branch:")? else {
        app.log.info(DELETE_CANCELED);
        return Ok(());
    };

    if !app
        .prompt
        .confirm(&format!("Really delete branch {name}?"))?
    {
        app.log.info(DELETE_CANCELED);
        return Ok(());
    }

    let force = force
        || app
            .prompt
            .confirm("Force delete (even if unmerged)?")?;
    let flag = if force { "-D" } else { "-d" };

    app.run_git(&["branch", flag, &name])?;
    info!(branch = %name, force, "branch deleted");
    app.refresh()?;
    Ok(())
}
