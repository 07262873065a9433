//! # Session state
//!
//! [`Session`] is the single shared handle on "who is signed in". It owns:
//!
//! - the credential token, cached in memory and mirrored into a
//!   [`CredentialStore`] so it survives restarts;
//! - the identity snapshot, published through a `tokio::sync::watch` channel so
//!   every view can [`subscribe`](Session::subscribe) to sign-in, sign-out,
//!   profile replacement and 401 invalidation.
//!
//! The handle is cheap to clone; clones share state. It is created once at the
//! application root and injected wherever it is needed.
//!
//! ## Invariant
//!
//! An identity is only ever published while a token is held:
//! [`clear`](Session::clear) drops both together, and
//! [`establish`](Session::establish) refuses an identity fetched with a token
//! that is no longer the current one. A token may exist without an identity
//! between start-up and the first successful re-validation.

use std::sync::{Arc, PoisonError, RwLock};

use store::CredentialStore;
use tokio::sync::watch;

use crate::models::User;

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn CredentialStore>,
    token: RwLock<Option<String>>,
    identity: watch::Sender<Option<User>>,
}

impl Session {
    /// Open a session over `store`, picking up any token saved by a previous run.
    /// The identity stays unset until it is re-validated.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let token = store.load();
        if token.is_some() {
            tracing::debug!("found stored credential token");
        }
        let (identity, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                store,
                token: RwLock::new(token),
                identity,
            }),
        }
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Snapshot of the signed-in user.
    pub fn user(&self) -> Option<User> {
        self.inner.identity.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.identity.borrow().is_some()
    }

    /// A token is held but the server has not confirmed who it belongs to.
    pub fn awaiting_identity(&self) -> bool {
        self.has_token() && !self.is_signed_in()
    }

    /// Receiver that observes every identity change.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.inner.identity.subscribe()
    }

    /// Hold a freshly issued token. Persistence failures are logged: the token
    /// still works for this run.
    pub(crate) fn store_token(&self, token: &str) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        if let Err(e) = self.inner.store.save(token) {
            tracing::warn!("failed to persist credential token: {e}");
        }
    }

    /// Publish `user` as the identity, provided `token` is still the held token.
    /// Returns false when the token was replaced or cleared in the meantime.
    pub(crate) fn establish(&self, token: &str, user: User) -> bool {
        let guard = self.inner.token.read().unwrap_or_else(PoisonError::into_inner);
        if guard.as_deref() != Some(token) {
            tracing::debug!("discarding identity fetched with a stale token");
            return false;
        }
        self.inner.identity.send_replace(Some(user));
        true
    }

    /// Replace the snapshot with the server's copy after a profile update.
    /// Ignored unless the same user is still signed in.
    pub(crate) fn replace_identity(&self, user: User) {
        self.inner.identity.send_if_modified(|current| match current {
            Some(existing) if existing.id == user.id && *existing != user => {
                *existing = user;
                true
            }
            _ => false,
        });
    }

    /// Drop token and identity. Always succeeds locally; a storage failure is
    /// logged and the in-memory state is still cleared.
    pub fn clear(&self) {
        let had_token = self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!("failed to remove stored credential token: {e}");
        }
        self.inner.identity.send_if_modified(|current| current.take().is_some());
        if had_token {
            tracing::info!("session cleared");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.has_token())
            .field("user", &self.user().map(|u| u.id))
            .finish()
    }
}
