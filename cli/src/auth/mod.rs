//! Authentication module for gitbridge.
//!
//! This module provides secure storage of a GitHub personal access token and
//! the construction of clone URLs that carry it.

pub mod clone_url;
pub mod credentials;

pub use clone_url::{accepts_token, authenticated_url, redact_credentials};
pub use credentials::{KeyringStore, SecretStore};
