//! This crate contains all shared UI plumbing for the workspace: the session
//! context, toasts and the notification feed.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{load_client_config, make_credential_store, make_session_manager, sleep};

mod auth;
pub use auth::{
    use_auth, use_client_config, use_session, AuthState, LogoutButton, RegisterForm,
    SessionProvider, SignInForm, SignedIn,
};

pub mod toast;
pub use toast::{push_toast, toast_error, toast_notice, use_toasts, ToastLevel, ToastProvider, Toasts};

mod notifications;
pub use notifications::{use_notifications, NotificationBell, NotificationFeed};
