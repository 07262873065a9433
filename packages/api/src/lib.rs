//! # API crate: UnivLoop client for the REST backend
//!
//! Everything the frontends need to talk to the backend: the HTTP client, the
//! session that tracks who is signed in, the typed collections and the media
//! uploader.
//!
//! ## Modules
//!
//! | Module | Target | Purpose |
//! |--------|--------|---------|
//! | [`auth`] | all | `SessionManager`: sign in/up/out, profile updates, re-validation; sign-up form checks |
//! | [`client`] | all | `ApiClient`: bearer auth, error mapping, 401 invalidation |
//! | [`collections`] | all | Uniform `list/get/create/update/delete` per collection plus extras (`like`, `add_comment`, `record_attempt`, `mark_as_read`) |
//! | [`config`] | all | Resolve `ClientConfig` from `.env`, TOML and `UNIVLOOP_*` overrides |
//! | [`error`] | all | `ApiError` taxonomy and user-facing messages |
//! | [`filters`] | all | Opaque query filters forwarded verbatim |
//! | [`models`] | all | Records exchanged with the backend |
//! | [`poll`] | native | Fixed-interval refresh tied to a handle |
//! | [`session`] | all | Token + identity state, broadcast over a watch channel |
//! | [`upload`] | all | Multipart uploads to the media host |
//!
//! ## Wiring
//!
//! ```no_run
//! # async fn run() -> Result<(), api::ApiError> {
//! use std::sync::Arc;
//!
//! let config = api::config::load_config().map_err(api::ApiError::Validation)?;
//! let session = api::Session::new(Arc::new(store::MemoryStore::new()));
//! let auth = api::SessionManager::new(api::ApiClient::new(&config, session)?);
//!
//! auth.restore().await?;
//! let latest = auth.client().resources().list(&api::Filters::new().with("limit", 10)).await?;
//! # let _ = latest;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod collections;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
#[cfg(not(target_arch = "wasm32"))]
pub mod poll;
pub mod session;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use auth::{AuthOutcome, Notice, SessionManager, SignOutOutcome, SignUpForm};
pub use client::{ApiClient, Health};
pub use collections::{community_filters, unread_count, Acknowledgement, Collection};
pub use error::ApiError;
pub use filters::Filters;
pub use models::*;
pub use session::Session;
pub use upload::{MediaKind, MediaUploader, UploadedMedia};

pub use store::ClientConfig;
