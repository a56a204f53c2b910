//! Clone URLs carrying a personal access token.

use std::borrow::Cow;

use url::Url;

/// Username paired with a token in HTTPS URLs.
pub const TOKEN_USER: &str = "oauth2";

/// Hosts for which a stored GitHub token is offered.
const GITHUB_HOSTS: [&str; 2] = ["github.com", "github.io"];

/// Stands in for credentials removed from a URL.
const REDACTED: &str = "***";

/// Embeds `token` into `url` as `scheme://oauth2:<token>@rest`.
///
/// The split happens at the first `://`; a URL without one is returned
/// unchanged.
#[must_use]
pub fn authenticated_url(url: &str, token: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => format!("{scheme}://{TOKEN_USER}:{token}@{rest}"),
        None => url.to_string(),
    }
}

/// Checks whether a stored GitHub token applies to `url`.
///
/// Only `https://` URLs that mention a GitHub host qualify, and the URL
/// must parse.
#[must_use]
pub fn accepts_token(url: &str) -> bool {
    url.starts_with("https://")
        && GITHUB_HOSTS.iter().any(|host| url.contains(host))
        && Url::parse(url).is_ok()
}

/// Replaces the userinfo of every URL in `text` with `***`.
///
/// Used for anything that may end up in tracing output or error messages,
/// such as git argument vectors or stderr.
#[must_use]
pub fn redact_credentials(text: &str) -> Cow<'_, str> {
    if !text.contains("://") || !text.contains('@') {
        return Cow::Borrowed(text);
    }
    text.split_inclusive(char::is_whitespace)
        .map(|piece| {
            let word = piece.trim_end();
            format!("{}{}", redact_word(word), &piece[word.len()..])
        })
        .collect::<String>()
        .into()
}

fn redact_word(word: &str) -> Cow<'_, str> {
    let Some((scheme, rest)) = word.split_once("://") else {
        return Cow::Borrowed(word);
    };
    if !rest.contains('@') {
        return Cow::Borrowed(word);
    }

    if let Ok(mut url) = Url::parse(word) {
        let has_userinfo = !url.username().is_empty() || url.password().is_some();
        if has_userinfo && url.set_password(None).is_ok() && url.set_username(REDACTED).is_ok() {
            return Cow::Owned(url.into());
        }
    }

    // Tokens containing '/' or ':' do not parse as userinfo; cut at the last '@'.
    match rest.rsplit_once('@') {
        Some((_, host)) => Cow::Owned(format!("{scheme}://{REDACTED}@{host}")),
        None => Cow::Borrowed(word),
    }
}
