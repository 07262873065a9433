//! # Credential token storage
//!
//! The client holds at most one opaque bearer token. [`CredentialStore`] is the
//! seam between the session logic in the `api` crate and wherever the platform
//! keeps that token:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStore`] | tests, or any process that should forget the token on exit |
//! | [`crate::FileStore`] | desktop / mobile, a `token` file under the data directory |
//! | `LocalStorage` | browser, `window.localStorage["token"]` (`web` feature) |
//!
//! Reads never fail: a missing or unreadable token is simply "no token", which
//! leaves the user anonymous. Writes report failures so callers can log them.

use thiserror::Error;

/// Fixed key the token is stored under, in every backend.
pub const TOKEN_KEY: &str = "token";

/// Errors raised when persisting or removing the token.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token storage unavailable")]
    Unavailable,
    #[error("failed to write token: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Synchronous key/value slot for the single credential token.
///
/// Browser `localStorage` is synchronous, and the token is a short string, so
/// the trait stays blocking and object-safe.
pub trait CredentialStore: Send + Sync {
    /// The stored token, if any.
    fn load(&self) -> Option<String>;

    /// Replace the stored token.
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}
