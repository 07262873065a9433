//! # Browser `localStorage` credential store
//!
//! [`LocalStorage`] is the [`CredentialStore`] used on the **web platform**. The
//! token lives under the fixed key [`TOKEN_KEY`] in `window.localStorage`, the
//! same slot a page script would use, so signing out in one tab signs out every
//! tab on next load.
//!
//! `LocalStorage` is a zero-size handle: the `Storage` object is looked up on
//! every call because `web_sys::Storage` is neither `Send` nor `Sync`.
//! A browser with storage disabled (private mode, sandboxed iframe) reads as
//! "no token" and reports [`StoreError::Unavailable`] on writes.

use web_sys::Storage;

use crate::credentials::{CredentialStore, StoreError, TOKEN_KEY};

/// `window.localStorage`-backed CredentialStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl CredentialStore for LocalStorage {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(TOKEN_KEY)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}
