//! # HTTP plumbing shared by every call
//!
//! [`ApiClient`] wraps a `reqwest::Client`, the REST base URL
//! (`<backend_url>/api`) and the [`Session`]. Every request:
//!
//! 1. attaches `Authorization: Bearer <token>` when a token is held;
//! 2. is sent once, with no retry;
//! 3. on a non-success status, becomes an [`ApiError`] carrying the status and
//!    the server's message;
//! 4. on 401, clears the session before the error is returned, unless the
//!    session has moved on to a different token since the request was sent.

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use store::ClientConfig;

use crate::error::ApiError;
use crate::filters::Filters;
use crate::session::Session;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    session: Session,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(config)?,
            base: config.api_base(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health").await
    }

    /// Fail locally when a call needs an authenticated author. A stored token
    /// whose identity has not been confirmed yet does not count.
    pub(crate) fn require_session(&self) -> Result<(), ApiError> {
        if self.session.is_signed_in() {
            Ok(())
        } else {
            Err(ApiError::NotSignedIn)
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, |req| req).await
    }

    pub(crate) async fn get_filtered<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &Filters,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, |req| {
            if filters.is_empty() {
                req
            } else {
                req.query(filters)
            }
        })
        .await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, |req| req.json(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::POST, path, |req| req).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, path, |req| req.json(body)).await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, |req| req).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self.execute(Method::DELETE, path, |req| req).await?;
        Ok(())
    }

    async fn execute<T, F>(&self, method: Method, path: &str, prepare: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let token = self.session.token();
        let mut request = self.http.request(method.clone(), format!("{}{}", self.base, path));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        tracing::debug!(%method, path, authenticated = token.is_some(), "api request");

        let response = prepare(request).send().await.map_err(|e| {
            tracing::warn!(%method, path, "request did not complete: {e}");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &body);
            if err.is_unauthorized() {
                self.invalidate(token.as_deref());
            } else {
                tracing::warn!(%method, path, status = status.as_u16(), "api error: {err}");
            }
            return Err(err);
        }

        decode(&body)
    }

    /// React to a 401 for a request sent with `token_used`.
    fn invalidate(&self, token_used: Option<&str>) {
        let current = self.session.token();
        if current.is_some() && current.as_deref() == token_used {
            tracing::info!("credentials rejected by the server; signing out");
            self.session.clear();
        }
    }
}

/// Shared `reqwest` setup. Browsers own their own timeouts, so the configured
/// one only applies on native targets.
pub(crate) fn http_client(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    let builder = reqwest::Client::builder();
    #[cfg(target_arch = "wasm32")]
    let _ = config;
    #[cfg(not(target_arch = "wasm32"))]
    let builder = match config.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    builder
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Parse a success body; an empty body reads as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = body.trim();
    let text = if body.is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .field("session", &self.session)
            .finish()
    }
}
