use std::sync::{Arc, Mutex};

use crate::credentials::{CredentialStore, StoreError};

/// In-memory credential store for testing and as a non-persistent fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as if a previous run had saved it.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        let mut slot = self.token.lock().map_err(|_| StoreError::Unavailable)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.token.lock().map_err(|_| StoreError::Unavailable)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));

        // A second save replaces the token
        store.save("def").unwrap();
        assert_eq!(store.load().as_deref(), Some("def"));

        store.clear().unwrap();
        assert!(store.load().is_none());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = MemoryStore::with_token("shared");
        let clone = store.clone();

        clone.clear().unwrap();
        assert!(store.load().is_none());
    }
}
