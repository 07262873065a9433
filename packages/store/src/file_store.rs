//! # Filesystem-backed credential store
//!
//! [`FileStore`] keeps the token in a single file so a desktop or mobile client
//! stays signed in across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── token      # the raw bearer token, no trailing newline
//! ```
//!
//! ## Platform data directories
//!
//! Callers usually pass `dirs::data_dir().join("univloop")`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/univloop/` |
//! | Linux | `~/.local/share/univloop/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\univloop\` |
//! | Android | App-internal storage (via `dirs`) |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::credentials::{CredentialStore, StoreError, TOKEN_KEY};

/// Filesystem-backed CredentialStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn token_path(&self) -> PathBuf {
        self.base.join(TOKEN_KEY)
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Option<String> {
        let content = match std::fs::read_to_string(self.token_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("unreadable token file, treating as signed out: {e}");
                return None;
            }
        };
        let token = content.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.token_path(), token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "univloop_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = scratch_dir("roundtrip");

        let store = FileStore::new(dir.clone());
        assert!(store.load().is_none());
        store.save("token-from-last-run").unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load().as_deref(), Some("token-from-last-run"));

        reopened.clear().unwrap();
        assert!(store.load().is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_clear_without_token_is_ok() {
        let dir = scratch_dir("clear_empty");
        let store = FileStore::new(dir.clone());
        assert!(store.clear().is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_blank_file_is_no_token() {
        let dir = scratch_dir("blank");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(TOKEN_KEY), "  \n").unwrap();

        let store = FileStore::new(dir.clone());
        assert!(store.load().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
