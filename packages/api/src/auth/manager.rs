use std::sync::Arc;

use serde::de::IgnoredAny;
use tokio::sync::{watch, Mutex};

use super::validation::{validate_sign_in, SignUpForm};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, ProfileUpdate, TokenResponse, User};
use crate::session::Session;

/// Short confirmation to show after an auth action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SIGNED_IN: Notice = Notice {
    title: "Connexion réussie!",
    description: "Bienvenue sur UnivLoop",
};

pub const SIGNED_UP: Notice = Notice {
    title: "Compte créé!",
    description: "Bienvenue sur UnivLoop",
};

pub const SIGNED_OUT: Notice = Notice {
    title: "Déconnexion",
    description: "À bientôt!",
};

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub user: User,
    pub notice: Notice,
}

/// Result of [`SessionManager::sign_out`], which never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOutOutcome {
    /// Whether the server acknowledged the logout.
    pub server_invalidated: bool,
    pub notice: Notice,
}

/// Drives the session lifecycle against `/auth/*`.
#[derive(Clone)]
pub struct SessionManager {
    client: ApiClient,
    /// Serialises token exchanges and identity checks.
    check: Arc<Mutex<()>>,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            check: Arc::new(Mutex::new(())),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session().subscribe()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        validate_sign_in(email, password)?;
        let _guard = self.check.lock().await;

        let request = LoginRequest {
            email: email.trim(),
            password,
        };
        let response: TokenResponse = self.client.post("/auth/login", &request).await?;
        let user = self.adopt(&response.access_token).await?;
        tracing::info!(user_id = %user.id, "signed in");
        Ok(AuthOutcome {
            user,
            notice: SIGNED_IN,
        })
    }

    /// Register, then sign in with the issued token. Invalid forms are rejected
    /// before any request is made.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<AuthOutcome, ApiError> {
        let request = form.validate()?;
        let _guard = self.check.lock().await;

        let response: TokenResponse = self.client.post("/auth/register", &request).await?;
        let user = self.adopt(&response.access_token).await?;
        tracing::info!(user_id = %user.id, "registered");
        Ok(AuthOutcome {
            user,
            notice: SIGNED_UP,
        })
    }

    /// Tell the server, then clear the local session whatever it answered.
    pub async fn sign_out(&self) -> SignOutOutcome {
        let server_invalidated = if self.session().has_token() {
            match self.client.post_empty::<IgnoredAny>("/auth/logout").await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("logout not acknowledged by the server: {e}");
                    false
                }
            }
        } else {
            false
        };
        self.session().clear();
        SignOutOutcome {
            server_invalidated,
            notice: SIGNED_OUT,
        }
    }

    /// Re-validate a token left by a previous run.
    ///
    /// Returns the identity when the token is still good. A 401 clears the
    /// session (via the client); other failures keep the token for a later try.
    pub async fn restore(&self) -> Result<Option<User>, ApiError> {
        let _guard = self.check.lock().await;
        let Some(token) = self.session().token() else {
            return Ok(None);
        };

        match self.client.get::<User>("/auth/me").await {
            Ok(user) => {
                if self.session().establish(&token, user.clone()) {
                    tracing::info!(user_id = %user.id, "session restored");
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => {
                tracing::warn!("could not re-validate stored session: {e}");
                Err(e)
            }
        }
    }

    /// Send the fields of `changes` that differ from the current profile.
    ///
    /// Editing the signed-in user replaces the session snapshot with the
    /// server's copy; editing anyone else leaves the session alone.
    pub async fn update_profile(&self, user_id: &str, changes: ProfileUpdate) -> Result<User, ApiError> {
        let current = self.session().user().filter(|user| user.id == user_id);
        let changes = match &current {
            Some(current) => changes.changes_from(current),
            None => changes,
        };

        if changes.is_empty() {
            return current.ok_or_else(|| ApiError::Validation("No changes to save".into()));
        }

        let user = self.client.users().update(user_id, &changes).await?;
        self.session().replace_identity(user.clone());
        Ok(user)
    }

    /// Hold `token` and fetch the identity it belongs to. On failure the token
    /// is dropped again so no token outlives a failed sign-in.
    async fn adopt(&self, token: &str) -> Result<User, ApiError> {
        self.session().store_token(token);
        match self.client.get::<User>("/auth/me").await {
            Ok(user) => {
                if self.session().establish(token, user.clone()) {
                    Ok(user)
                } else {
                    Err(ApiError::NotSignedIn)
                }
            }
            Err(e) => {
                if self.session().token().as_deref() == Some(token) {
                    self.session().clear();
                }
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("client", &self.client)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        anonymous_client, client_on, client_with_store, sample_user, sample_user_json,
        signed_in_client, unreachable_client, UNREACHABLE_ORIGIN,
    };
    use serde_json::json;
    use std::sync::Arc;
    use store::{CredentialStore, MemoryStore};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_me(server: &MockServer, token: &str) {
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_user_json()))
            .mount(server)
            .await;
    }

    fn valid_form() -> SignUpForm {
        SignUpForm {
            name: "Amina".into(),
            email: "amina@campus.example".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            ..SignUpForm::default()
        }
    }

    #[tokio::test]
    async fn test_sign_in_establishes_server_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "amina@campus.example", "password": "secret1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "t-1", "token_type": "bearer"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_me(&server, "t-1").await;

        let store = MemoryStore::new();
        let manager = SessionManager::new(client_with_store(&server, store.clone()));
        let mut rx = manager.subscribe();

        let outcome = manager
            .sign_in(" amina@campus.example ", "secret1")
            .await
            .unwrap();
        assert_eq!(outcome.user, sample_user());
        assert_eq!(outcome.notice, SIGNED_IN);
        assert_eq!(manager.session().user(), Some(sample_user()));
        assert_eq!(store.load().as_deref(), Some("t-1"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&sample_user()));
    }

    #[tokio::test]
    async fn test_wrong_password_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Incorrect email or password"})),
            )
            .mount(&server)
            .await;

        let manager = SessionManager::new(anonymous_client(&server));
        let err = manager.sign_in("amina@campus.example", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Incorrect email or password");
        assert!(!manager.session().is_signed_in());
        assert!(!manager.session().has_token());
    }

    #[tokio::test]
    async fn test_blank_sign_in_is_local() {
        let server = MockServer::start().await;
        let manager = SessionManager::new(anonymous_client(&server));
        let err = manager.sign_in("", "secret1").await.unwrap_err();
        assert!(err.is_local());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_identity_fetch_discards_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t-1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let manager = SessionManager::new(client_with_store(&server, store.clone()));
        let err = manager.sign_in("amina@campus.example", "secret1").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!manager.session().has_token());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_rejections_never_hit_the_network() {
        let server = MockServer::start().await;
        let manager = SessionManager::new(anonymous_client(&server));

        let short = SignUpForm {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..valid_form()
        };
        assert!(manager.sign_up(&short).await.unwrap_err().is_local());

        let mismatched = SignUpForm {
            confirm_password: "secret2".into(),
            ..valid_form()
        };
        assert!(manager.sign_up(&mismatched).await.unwrap_err().is_local());

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_signs_in_with_issued_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"access_token": "t-new", "token_type": "bearer"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_me(&server, "t-new").await;

        let manager = SessionManager::new(anonymous_client(&server));
        let outcome = manager.sign_up(&valid_form()).await.unwrap();
        assert_eq!(outcome.notice, SIGNED_UP);
        assert_eq!(manager.session().token().as_deref(), Some("t-new"));
        assert!(manager.session().is_signed_in());
    }

    #[tokio::test]
    async fn test_duplicate_email_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
            )
            .mount(&server)
            .await;

        let manager = SessionManager::new(anonymous_client(&server));
        let err = manager.sign_up(&valid_form()).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_server_is_unreachable() {
        let store = MemoryStore::new();
        let client = unreachable_client(store.clone());
        client.session().store_token("t-1");
        client.session().establish("t-1", sample_user());
        let manager = SessionManager::new(client);

        let outcome = manager.sign_out().await;
        assert!(!outcome.server_invalidated);
        assert_eq!(outcome.notice, SIGNED_OUT);
        assert!(!manager.session().is_signed_in());
        assert!(!manager.session().has_token());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_acknowledged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("authorization", "Bearer t-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Successfully logged out"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let manager = SessionManager::new(signed_in_client(&server, "t-1"));
        let outcome = manager.sign_out().await;
        assert!(outcome.server_invalidated);
        assert!(!manager.session().has_token());
    }

    #[tokio::test]
    async fn test_restore_revalidates_stored_token() {
        let server = MockServer::start().await;
        mount_me(&server, "t-old").await;

        let manager = SessionManager::new(client_with_store(&server, MemoryStore::with_token("t-old")));
        assert!(!manager.session().is_signed_in());

        let user = manager.restore().await.unwrap();
        assert_eq!(user, Some(sample_user()));
        assert!(manager.session().is_signed_in());
    }

    #[tokio::test]
    async fn test_restore_with_expired_token_goes_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("t-old");
        let manager = SessionManager::new(client_with_store(&server, store.clone()));
        assert_eq!(manager.restore().await.unwrap(), None);
        assert!(!manager.session().has_token());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_restore_keeps_token_on_network_failure() {
        let manager = SessionManager::new(unreachable_client(MemoryStore::with_token("t-old")));

        let err = manager.restore().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(manager.session().token().as_deref(), Some("t-old"));
        assert!(!manager.session().is_signed_in());
    }

    #[tokio::test]
    async fn test_restore_after_network_failure_publishes_identity() {
        let session = Session::new(Arc::new(MemoryStore::with_token("t-old")));
        let mut rx = session.subscribe();

        let offline = SessionManager::new(client_on(UNREACHABLE_ORIGIN, session.clone()));
        assert!(offline.restore().await.is_err());
        assert!(session.awaiting_identity());
        assert!(!rx.has_changed().unwrap());

        let server = MockServer::start().await;
        mount_me(&server, "t-old").await;
        let online = SessionManager::new(client_on(&server.uri(), session.clone()));

        assert_eq!(online.restore().await.unwrap(), Some(sample_user()));
        assert!(!session.awaiting_identity());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(sample_user()));
    }

    #[tokio::test]
    async fn test_restore_without_token_is_a_no_op() {
        let server = MockServer::start().await;
        let manager = SessionManager::new(anonymous_client(&server));
        assert_eq!(manager.restore().await.unwrap(), None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_sends_only_changes() {
        let server = MockServer::start().await;
        let mut updated = sample_user_json();
        updated["department"] = json!("Mathématiques");
        Mock::given(method("PUT"))
            .and(path("/api/users/u-1"))
            .and(body_json(json!({"department": "Mathématiques"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .expect(1)
            .mount(&server)
            .await;

        let manager = SessionManager::new(signed_in_client(&server, "t-1"));
        let changes = ProfileUpdate {
            name: Some("Amina".into()),
            department: Some("Mathématiques".into()),
            ..ProfileUpdate::default()
        };
        let user = manager.update_profile("u-1", changes).await.unwrap();
        assert_eq!(user.department.as_deref(), Some("Mathématiques"));
        assert_eq!(manager.session().user(), Some(user));
    }

    #[tokio::test]
    async fn test_no_op_update_skips_the_network() {
        let server = MockServer::start().await;
        let manager = SessionManager::new(signed_in_client(&server, "t-1"));
        let changes = ProfileUpdate {
            name: Some("Amina".into()),
            ..ProfileUpdate::default()
        };
        let user = manager.update_profile("u-1", changes).await.unwrap();
        assert_eq!(user, sample_user());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_updating_another_profile_keeps_identity() {
        let server = MockServer::start().await;
        let mut other = sample_user_json();
        other["id"] = json!("u-2");
        other["name"] = json!("Karim");
        Mock::given(method("PUT"))
            .and(path("/api/users/u-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(other))
            .mount(&server)
            .await;

        let manager = SessionManager::new(signed_in_client(&server, "t-1"));
        let changes = ProfileUpdate {
            name: Some("Karim".into()),
            ..ProfileUpdate::default()
        };
        let user = manager.update_profile("u-2", changes).await.unwrap();
        assert_eq!(user.name, "Karim");
        assert_eq!(manager.session().user(), Some(sample_user()));
    }
}
