//! Notification feed and bell.
//!
//! [`use_notifications`] keeps a [`NotificationFeed`] signal fresh: it loads
//! whenever the signed-in user changes and then polls on a fixed interval.
//! Both tasks belong to the calling component and stop when it unmounts.
//! Nothing is fetched while signed out.

use std::time::Duration;

use api::{Notification, SessionManager};
use dioxus::prelude::*;

use crate::auth::{use_auth, use_client_config, use_session};
use crate::icons::FaBell;
use crate::platform::sleep;
use crate::toast::{toast_error, use_toasts};
use crate::Icon;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    /// False until the first successful fetch.
    pub loaded: bool,
}

impl NotificationFeed {
    pub fn unread(&self) -> usize {
        api::unread_count(&self.items)
    }

    pub fn mark_read(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
            item.read = true;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|n| n.id != id);
    }
}

async fn refresh(manager: &SessionManager, mut feed: Signal<NotificationFeed>) {
    if !manager.session().is_signed_in() {
        if *feed.peek() != NotificationFeed::default() {
            feed.set(NotificationFeed::default());
        }
        return;
    }

    match manager.client().notifications().mine().await {
        Ok(items) => feed.set(NotificationFeed {
            items,
            loaded: true,
        }),
        Err(e) if e.is_unauthorized() => feed.set(NotificationFeed::default()),
        // Background refresh: keep the last good feed and try again next tick
        Err(e) => tracing::warn!("notification refresh failed: {e}"),
    }
}

/// Notification feed for the signed-in user, refreshed every `interval`.
/// `None` loads on identity changes only.
pub fn use_notifications(interval: Option<Duration>) -> Signal<NotificationFeed> {
    let manager = use_session();
    let auth = use_auth();
    let feed = use_signal(NotificationFeed::default);

    let on_identity = manager.clone();
    let _ = use_resource(move || {
        let manager = on_identity.clone();
        async move {
            // Reading the signal here re-runs the load when the user changes
            let _user = auth().user.map(|user| user.id);
            refresh(&manager, feed).await;
        }
    });

    use_future(move || {
        let manager = manager.clone();
        async move {
            let Some(interval) = interval else {
                return;
            };
            loop {
                sleep(interval).await;
                if auth.peek().is_signed_in() {
                    refresh(&manager, feed).await;
                }
            }
        }
    });

    feed
}

/// Bell icon with the unread count; opens the list of notifications.
#[component]
pub fn NotificationBell() -> Element {
    let config = use_client_config();
    let manager = use_session();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut feed = use_notifications(config.poll_interval());
    let mut open = use_signal(|| false);

    if !auth().is_signed_in() {
        return rsx! {};
    }

    let unread = feed().unread();
    let items = feed().items.clone();

    rsx! {
        div {
            class: "notification-bell",
            button {
                class: "notification-bell__toggle",
                title: "Notifications",
                onclick: move |_| { let shown = open(); open.set(!shown); },
                Icon { icon: FaBell, width: 16, height: 16 }
                if unread > 0 {
                    span { class: "notification-bell__badge", "{unread}" }
                }
            }
            if open() {
                ul {
                    class: "notification-bell__list",
                    if items.is_empty() {
                        li { class: "notification-bell__empty", "Aucune notification" }
                    }
                    for item in items {
                        li {
                            key: "{item.id}",
                            class: if item.read { "notification read" } else { "notification unread" },
                            onclick: {
                                let manager = manager.clone();
                                let id = item.id.clone();
                                move |_| {
                                    let manager = manager.clone();
                                    let id = id.clone();
                                    async move {
                                        match manager.client().notifications().mark_as_read(&id).await {
                                            Ok(_) => feed.write().mark_read(&id),
                                            Err(e) => toast_error(&mut toasts, &e),
                                        }
                                    }
                                }
                            },
                            strong { "{item.title}" }
                            p { "{item.message}" }
                            button {
                                class: "notification__delete",
                                title: "Supprimer",
                                onclick: {
                                    let manager = manager.clone();
                                    let id = item.id.clone();
                                    move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        let manager = manager.clone();
                                        let id = id.clone();
                                        async move {
                                            match manager.client().notifications().delete(&id).await {
                                                Ok(()) => feed.write().remove(&id),
                                                Err(e) => toast_error(&mut toasts, &e),
                                            }
                                        }
                                    }
                                },
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
