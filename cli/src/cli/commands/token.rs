//! Token command handlers.
//!
//! This module implements the Credentials menu:
//! - [`handle_set`] - Store a GitHub personal access token (`gitbridge token set`)
//! - [`handle_delete`] - Remove it (`gitbridge token delete`)
//! - [`handle_status`] - Report whether one is stored (`gitbridge token status`)

use tracing::info;

use crate::app::prompt::non_empty;
use crate::app::AppState;
use crate::auth::SecretStore;
use crate::error::Result;
use crate::process::CommandRunner;

/// Handles `gitbridge token set`.
///
/// The token is read as one line from stdin, so it can be piped in.
pub fn handle_set<R: CommandRunner>(
    app: &mut AppState<R>,
    store: &dyn SecretStore,
    user: Option<String>,
) -> Result<()> {
    let user = match user {
        Some(u) => non_empty(Some(u)),
        None => non_empty(app.prompt.ask("GitHub username?")?),
    };
    let Some(user) = user else {
        app.log.info("Token setup canceled.");
        return Ok(());
    };

    let token = non_empty(app.prompt.ask(&format!(
        "Personal Access Token for {user} (needs 'repo' scope for private repositories)?"
    ))?);
    let Some(token) = token else {
        app.log.error("No Personal Access Token entered.");
        return Ok(());
    };

    store.save(&token)?;
    info!(%user, "token stored");
    app.log.info(format!(
        "GitHub Personal Access Token for {user} stored securely."
    ));
    Ok(())
}

/// Handles `gitbridge token delete`.
pub fn handle_delete<R: CommandRunner>(app: &mut AppState<R>, store: &dyn SecretStore) -> Result<()> {
    if !app
        .prompt
        .confirm("Delete the stored GitHub Personal Access Token?")?
    {
        return Ok(());
    }

    if store.delete()? {
        app.log.info("GitHub Personal Access Token deleted.");
    } else {
        app.log.info("No GitHub Personal Access Token was stored.");
    }
    Ok(())
}

/// Handles `gitbridge token status`. Never prints the token itself.
pub fn handle_status<R: CommandRunner>(app: &mut AppState<R>, store: &dyn SecretStore) -> Result<()> {
    match store.load()? {
        Some(_) => app.log.info("A GitHub Personal Access Token is stored."),
        None => app.log.info("No GitHub Personal Access Token stored."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::app::log::LogLevel;
    use crate::app::prompt::MockPrompter;
    use crate::app::state::testing::{recording, state_in};
    use crate::auth::credentials::MockSecretStore;
    use crate::error::BridgeError;

    #[test]
    fn set_stores_token() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt
            .expect_ask()
            .returning(|_| Ok(Some("ghp_s3cret\n".to_string())));
        let mut app = state_in(dir.path(), runner, prompt);

        let mut store = MockSecretStore::new();
        store
            .expect_save()
            .with(eq("ghp_s3cret"))
            .times(1)
            .returning(|_| Ok(()));

        handle_set(&mut app, &store, Some("octocat".to_string())).unwrap();
        assert!(app.log.contains(
            LogLevel::Info,
            "GitHub Personal Access Token for octocat stored securely."
        ));
        assert!(!app.log.entries().iter().any(|e| e.message.contains("ghp_s3cret")));
    }

    #[test]
    fn empty_token_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt.expect_ask().returning(|_| Ok(Some(String::new())));
        let mut app = state_in(dir.path(), runner, prompt);

        let mut store = MockSecretStore::new();
        store.expect_save().never();

        handle_set(&mut app, &store, Some("octocat".to_string())).unwrap();
        assert!(app
            .log
            .contains(LogLevel::Error, "No Personal Access Token entered."));
    }

    #[test]
    fn empty_user_cancels_before_token_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt
            .expect_ask()
            .with(eq("GitHub username?"))
            .times(1)
            .returning(|_| Ok(None));
        let mut app = state_in(dir.path(), runner, prompt);

        handle_set(&mut app, &MockSecretStore::new(), None).unwrap();
        assert!(app.log.contains(LogLevel::Info, "Token setup canceled."));
    }

    #[test]
    fn keyring_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt
            .expect_ask()
            .returning(|_| Ok(Some("ghp_s3cret".to_string())));
        let mut app = state_in(dir.path(), runner, prompt);

        let mut store = MockSecretStore::new();
        store
            .expect_save()
            .returning(|_| Err(BridgeError::CredentialStorage("locked".to_string())));

        let err = handle_set(&mut app, &store, Some("octocat".to_string())).unwrap_err();
        assert!(matches!(err, BridgeError::CredentialStorage(_)));
    }

    #[test]
    fn delete_reports_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt.expect_confirm().returning(|_| Ok(true));
        let mut app = state_in(dir.path(), runner, prompt);

        let mut store = MockSecretStore::new();
        store.expect_delete().returning(|| Ok(false));

        handle_delete(&mut app, &store).unwrap();
        assert!(app.log.contains(LogLevel::Info, "No GitHub Personal Access Token was stored."));
    }

    #[test]
    fn declined_delete_keeps_token() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut prompt = MockPrompter::new();
        prompt.expect_confirm().returning(|_| Ok(false));
        let mut app = state_in(dir.path(), runner, prompt);

        let mut store = MockSecretStore::new();
        store.expect_delete().never();

        handle_delete(&mut app, &store).unwrap();
    }

    #[test]
    fn status_never_prints_token() {
        let dir = tempfile::tempdir().unwrap();
        let (_, runner) = recording();
        let mut app = state_in(dir.path(), runner, MockPrompter::new());

        let mut store = MockSecretStore::new();
        store
            .expect_load()
            .returning(|| Ok(Some("ghp_s3cret".to_string())));

        handle_status(&mut app, &store).unwrap();
        assert!(app.log.contains(LogLevel::Info, "A GitHub Personal Access Token is stored."));
        assert!(!app.log.entries().iter().any(|e| e.message.contains("ghp_s3cret")));
    }
}
