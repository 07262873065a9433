//! Transient notifications ("toasts").
//!
//! Toasts are queued in a [`Toasts`] signal provided by [`ToastProvider`] and
//! dismissed after [`TOAST_TTL`] or when clicked. API failures go through
//! [`toast_error`], which shows the server's message or the generic fallback.

use std::time::Duration;

use api::auth::Notice;
use api::ApiError;
use dioxus::prelude::*;

use crate::platform::sleep;

pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Queue a toast and return its id.
    pub fn push(&mut self, level: ToastLevel, title: &str, description: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            title: title.to_string(),
            description: description.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }
}

/// Title and text for an API failure, or `None` when the failure needs no
/// toast. A 401 already reset the session, which is feedback enough.
pub fn error_toast(err: &ApiError) -> Option<(&'static str, String)> {
    match err {
        ApiError::Unauthorized { .. } => None,
        ApiError::Validation(_) | ApiError::NotSignedIn => Some(("Attention", err.user_message())),
        ApiError::Network(_) => Some(("Connexion impossible", err.user_message())),
        _ => Some(("Erreur", err.user_message())),
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Queue a toast that removes itself after [`TOAST_TTL`].
pub fn push_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, title: &str, description: &str) {
    let id = toasts.write().push(level, title, description);
    let mut toasts = *toasts;
    spawn(async move {
        sleep(TOAST_TTL).await;
        toasts.write().dismiss(id);
    });
}

pub fn toast_error(toasts: &mut Signal<Toasts>, err: &ApiError) {
    tracing::warn!("api call failed: {err}");
    if let Some((title, description)) = error_toast(err) {
        push_toast(toasts, ToastLevel::Error, title, &description);
    }
}

pub fn toast_notice(toasts: &mut Signal<Toasts>, notice: Notice) {
    push_toast(toasts, ToastLevel::Success, notice.title, notice.description);
}

/// Provides the toast queue and renders it above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Toasts::default()));

    rsx! {
        {children}
        ToastViewport {}
    }
}

#[component]
fn ToastViewport() -> Element {
    let mut toasts = use_toasts();
    let entries = toasts().entries.clone();

    rsx! {
        div {
            class: "toast-viewport",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Error => "toast toast--error",
                        ToastLevel::Success => "toast toast--success",
                        ToastLevel::Info => "toast toast--info",
                    },
                    onclick: move |_| toasts.write().dismiss(toast.id),
                    strong { "{toast.title}" }
                    span { "{toast.description}" }
                }
            }
        }
    }
}
