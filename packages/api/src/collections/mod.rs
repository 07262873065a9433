//! # Uniform collection contract
//!
//! Every server collection is reached through a [`Collection`] handle that
//! borrows the [`ApiClient`]:
//!
//! | Operation | Route | Needs a token |
//! |-----------|-------|---------------|
//! | [`list`](Collection::list) | `GET /{collection}?{filters}` | no |
//! | [`get`](Collection::get) | `GET /{collection}/{id}` | no |
//! | [`create`](Collection::create) | `POST /{collection}` | yes |
//! | [`update`](Collection::update) | `PUT /{collection}/{id}` | yes |
//! | [`delete`](Collection::delete) | `DELETE /{collection}/{id}` | yes |
//!
//! Calls that need a token fail with [`ApiError::NotSignedIn`] before touching
//! the network unless the session holds a confirmed identity. A token left by
//! a previous run is not enough until it has been re-validated.
//! Collection-specific extras live in the sibling modules as inherent impls on
//! the concrete handle type (e.g. `Collection<'_, Resource>::like`).

mod discussions;
mod notifications;
mod quizzes;
mod resources;
mod users;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::filters::Filters;
use crate::models::{Discussion, Flashcard, Notification, Quiz, Resource, Statistics, Subject};

pub use discussions::community_filters;
pub use notifications::unread_count;
pub use users::Users;

/// Typed handle on one REST collection.
pub struct Collection<'a, T> {
    client: &'a ApiClient,
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

pub type Subjects<'a> = Collection<'a, Subject>;
pub type Resources<'a> = Collection<'a, Resource>;
pub type Discussions<'a> = Collection<'a, Discussion>;
pub type Quizzes<'a> = Collection<'a, Quiz>;
pub type Flashcards<'a> = Collection<'a, Flashcard>;
pub type Notifications<'a> = Collection<'a, Notification>;

/// `{"message": "..."}` answers to action routes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

impl<'a, T> Collection<'a, T> {
    pub(crate) fn new(client: &'a ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _record: PhantomData,
        }
    }

    /// Collection route, e.g. `/resources`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    fn member(&self, id: &str) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id))
    }

    fn action(&self, id: &str, action: &str) -> String {
        format!("{}/{action}", self.member(id))
    }
}

impl<T: DeserializeOwned> Collection<'_, T> {
    /// List records; `filters` are forwarded verbatim as query parameters.
    pub async fn list(&self, filters: &Filters) -> Result<Vec<T>, ApiError> {
        self.client.get_filtered(self.path, filters).await
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        self.client.get(&self.member(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, fields: &B) -> Result<T, ApiError> {
        self.client.require_session()?;
        self.client.post(self.path, fields).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, fields: &B) -> Result<T, ApiError> {
        self.client.require_session()?;
        self.client.put(&self.member(id), fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.require_session()?;
        self.client.delete(&self.member(id)).await
    }
}

impl ApiClient {
    pub fn subjects(&self) -> Subjects<'_> {
        Collection::new(self, "/subjects")
    }

    pub fn resources(&self) -> Resources<'_> {
        Collection::new(self, "/resources")
    }

    pub fn discussions(&self) -> Discussions<'_> {
        Collection::new(self, "/discussions")
    }

    pub fn quizzes(&self) -> Quizzes<'_> {
        Collection::new(self, "/quizzes")
    }

    pub fn flashcards(&self) -> Flashcards<'_> {
        Collection::new(self, "/flashcards")
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Collection::new(self, "/notifications")
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Platform-wide counters.
    pub async fn statistics(&self) -> Result<Statistics, ApiError> {
        self.get("/statistics").await
    }
}
