//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] owns the [`SessionManager`] for the whole app. Views
//! reach it through [`use_session`] instead of a global, and read the identity
//! through the [`use_auth`] signal, which mirrors every change broadcast by the
//! session (sign-in, sign-out, profile update, 401 invalidation).

use std::time::Duration;

use api::{ApiError, ClientConfig, SessionManager, User};
use dioxus::prelude::*;

use crate::platform::{load_client_config, make_session_manager, sleep};
use crate::toast::{toast_error, toast_notice, use_toasts};

/// How often a stored token whose check failed is re-validated.
const SESSION_RECHECK: Duration = Duration::from_secs(30);

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the stored token has been re-validated.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The session manager provided by [`SessionProvider`].
pub fn use_session() -> SessionManager {
    use_context::<SessionManager>()
}

pub fn use_client_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Provider component that manages the session.
/// Wrap your app with this component to enable authentication.
///
/// Provides the [`SessionManager`], the [`ClientConfig`] and the
/// [`AuthState`] signal as context.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_hook(load_client_config);
    let manager = use_hook(|| make_session_manager(&config).map_err(|e| e.to_string()));

    // Both hooks above are memoised, so this branch is the same on every render
    let manager = match manager {
        Ok(manager) => manager,
        Err(message) => {
            tracing::error!("cannot start the API client: {message}");
            return rsx! {
                div { class: "startup-error", "{message}" }
            };
        }
    };

    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| config.clone());
    let manager = use_context_provider(|| manager);
    use_context_provider(|| auth_state);

    // Re-validate the stored token, then mirror every identity change.
    // The task is cancelled with the component.
    let watcher = manager.clone();
    use_future(move || {
        let manager = watcher.clone();
        async move {
            let mut identity = manager.subscribe();
            let user = match manager.restore().await {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!("session check failed, retrying later: {e}");
                    None
                }
            };
            auth_state.set(AuthState {
                user,
                loading: false,
            });
            identity.mark_unchanged();

            while identity.changed().await.is_ok() {
                let user = identity.borrow_and_update().clone();
                if auth_state.peek().user != user {
                    auth_state.set(AuthState {
                        user,
                        loading: false,
                    });
                }
            }
        }
    });

    // A failed startup check leaves the token in place without an identity.
    // Keep re-validating it until the server answers either way.
    use_future(move || {
        let manager = manager.clone();
        async move {
            loop {
                sleep(SESSION_RECHECK).await;
                if !manager.session().awaiting_identity() {
                    continue;
                }
                if let Err(e) = manager.restore().await {
                    tracing::debug!("session still unconfirmed: {e}");
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Renders `children` only while someone is signed in.
#[component]
pub fn SignedIn(children: Element, fallback: Option<Element>) -> Element {
    let auth = use_auth();
    if auth().is_signed_in() {
        rsx! { {children} }
    } else {
        fallback.unwrap_or_else(|| rsx! {})
    }
}

/// Button to log out the current user. Local state is cleared even when the
/// server cannot be reached.
#[component]
pub fn LogoutButton(
    #[props(default = "Déconnexion".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let manager = use_session();
    let mut toasts = use_toasts();

    let onclick = move |_| {
        let manager = manager.clone();
        async move {
            let outcome = manager.sign_out().await;
            if !outcome.server_invalidated {
                tracing::info!("signed out locally only");
            }
            toast_notice(&mut toasts, outcome.notice);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Email/password sign-in form. Validation errors are shown inline, server
/// failures as toasts.
#[component]
pub fn SignInForm() -> Element {
    let manager = use_session();
    let mut toasts = use_toasts();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let manager = manager.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match manager.sign_in(&email(), &password()).await {
                Ok(outcome) => {
                    password.set(String::new());
                    toast_notice(&mut toasts, outcome.notice);
                }
                Err(ApiError::Validation(message)) => error.set(Some(message)),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast_error(&mut toasts, &e);
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_submit,
            input {
                r#type: "email",
                placeholder: "Email",
                value: "{email}",
                oninput: move |e| email.set(e.value()),
            }
            input {
                r#type: "password",
                placeholder: "Mot de passe",
                value: "{password}",
                oninput: move |e| password.set(e.value()),
            }
            if let Some(message) = error() {
                p { class: "auth-form__error", "{message}" }
            }
            button {
                r#type: "submit",
                disabled: loading(),
                if loading() { "Connexion..." } else { "Se connecter" }
            }
        }
    }
}

/// Registration form. The password rules are checked before anything is
/// sent.
#[component]
pub fn RegisterForm() -> Element {
    let manager = use_session();
    let mut toasts = use_toasts();
    let mut form = use_signal(api::SignUpForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let manager = manager.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match manager.sign_up(&form()).await {
                Ok(outcome) => {
                    form.set(api::SignUpForm::default());
                    toast_notice(&mut toasts, outcome.notice);
                }
                Err(ApiError::Validation(message)) => error.set(Some(message)),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast_error(&mut toasts, &e);
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_submit,
            input {
                placeholder: "Nom complet",
                value: "{form().name}",
                oninput: move |e| form.write().name = e.value(),
            }
            input {
                r#type: "email",
                placeholder: "Email",
                value: "{form().email}",
                oninput: move |e| form.write().email = e.value(),
            }
            input {
                r#type: "password",
                placeholder: "Mot de passe",
                value: "{form().password}",
                oninput: move |e| form.write().password = e.value(),
            }
            input {
                r#type: "password",
                placeholder: "Confirmer le mot de passe",
                value: "{form().confirm_password}",
                oninput: move |e| form.write().confirm_password = e.value(),
            }
            input {
                placeholder: "Département",
                value: "{form().department}",
                oninput: move |e| form.write().department = e.value(),
            }
            input {
                placeholder: "Faculté",
                value: "{form().faculty}",
                oninput: move |e| form.write().faculty = e.value(),
            }
            input {
                placeholder: "Année d'étude",
                value: "{form().year_of_study}",
                oninput: move |e| form.write().year_of_study = e.value(),
            }
            if let Some(message) = error() {
                p { class: "auth-form__error", "{message}" }
            }
            button {
                r#type: "submit",
                disabled: loading(),
                if loading() { "Création..." } else { "Créer un compte" }
            }
        }
    }
}
