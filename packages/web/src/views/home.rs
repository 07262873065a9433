//! Landing page: platform counters and the latest shared resources.

use api::{Filters, Resource, Statistics};
use dioxus::prelude::*;
use ui::{toast_error, use_auth, use_session, use_toasts, SignedIn};

const LATEST_LIMIT: u32 = 6;

#[component]
pub fn Home() -> Element {
    let manager = use_session();
    let mut toasts = use_toasts();
    let mut stats = use_signal(Statistics::default);
    let mut latest = use_signal(Vec::<Resource>::new);

    let _loader = use_resource(move || {
        let manager = manager.clone();
        async move {
            let client = manager.client();
            match client.statistics().await {
                Ok(counters) => stats.set(counters),
                Err(e) => toast_error(&mut toasts, &e),
            }
            let filters = Filters::new().with("limit", LATEST_LIMIT);
            match client.resources().list(&filters).await {
                Ok(resources) => latest.set(resources),
                Err(e) => toast_error(&mut toasts, &e),
            }
        }
    });

    let counters = stats();

    rsx! {
        section {
            h1 { "UnivLoop" }
            ul {
                class: "stats",
                li { "{counters.total_users} étudiants" }
                li { "{counters.total_resources} ressources" }
                li { "{counters.total_discussions} discussions" }
                li { "{counters.total_quizzes} quiz" }
                li { "{counters.total_flashcards} flashcards" }
            }
        }
        section {
            h2 { "Dernières ressources" }
            for resource in latest() {
                ResourceRow { key: "{resource.id}", resource, latest }
            }
        }
    }
}

#[component]
fn ResourceRow(resource: Resource, latest: Signal<Vec<Resource>>) -> Element {
    let manager = use_session();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut latest = latest;
    let liked = auth()
        .user
        .is_some_and(|user| resource.is_liked_by(&user.id));
    let id = resource.id.clone();

    let on_like = move |_| {
        let manager = manager.clone();
        let id = id.clone();
        async move {
            match manager.client().resources().like(&id).await {
                Ok(outcome) => {
                    let user_id = manager.session().user().map(|user| user.id);
                    if let Some(item) = latest.write().iter_mut().find(|r| r.id == id) {
                        item.likes = outcome.likes;
                        if let Some(user_id) = user_id {
                            item.liked_by.retain(|u| *u != user_id);
                            if outcome.liked {
                                item.liked_by.push(user_id);
                            }
                        }
                    }
                }
                Err(e) => toast_error(&mut toasts, &e),
            }
        }
    };

    rsx! {
        article {
            class: "resource",
            a { href: "{resource.file_url}", target: "_blank", "{resource.title}" }
            span { class: "resource__author", " · {resource.author_name}" }
            span { class: "resource__likes", " · {resource.likes} ♥" }
            SignedIn {
                button {
                    class: if liked { "resource__like liked" } else { "resource__like" },
                    onclick: on_like,
                    if liked { "Je n'aime plus" } else { "J'aime" }
                }
            }
        }
    }
}
