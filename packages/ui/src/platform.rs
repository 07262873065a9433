//! Platform-specific plumbing shared by every frontend.
//!
//! The credential store depends on where the app runs:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorage`]
//! - **Desktop / Mobile** (native): a file under `<data_dir>/univloop/` via [`store::FileStore`]

use std::sync::Arc;
use std::time::Duration;

use store::CredentialStore;

/// Create the platform-appropriate credential store.
pub fn make_credential_store() -> Arc<dyn CredentialStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorage::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("univloop");
        Arc::new(store::FileStore::new(base))
    }
}

/// Resolve the client configuration, falling back to defaults when it
/// cannot be read.
pub fn load_client_config() -> api::ClientConfig {
    api::config::load_config().unwrap_or_else(|e| {
        tracing::error!("falling back to default configuration: {e}");
        api::ClientConfig::default()
    })
}

/// Build the session manager for this run over the platform credential store.
pub fn make_session_manager(config: &api::ClientConfig) -> Result<api::SessionManager, api::ApiError> {
    let session = api::Session::new(make_credential_store());
    let client = api::ApiClient::new(config, session)?;
    Ok(api::SessionManager::new(client))
}

/// Timer that works on both the browser and native runtimes.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
