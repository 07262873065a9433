//! Client-side persistence for UnivLoop: the credential token and the client
//! configuration document.

pub mod config;
pub mod credentials;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use config::ClientConfig;
pub use credentials::{CredentialStore, StoreError, TOKEN_KEY};
