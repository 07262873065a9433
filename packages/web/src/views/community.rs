//! Community feed: discussions filtered by audience, subject and search.

use api::{community_filters, Discussion, GroupType};
use dioxus::prelude::*;
use ui::{toast_error, use_auth, use_session, use_toasts};

const GROUPS: [(GroupType, &str); 4] = [
    (GroupType::Global, "Global"),
    (GroupType::Faculty, "Ma faculté"),
    (GroupType::Department, "Mon département"),
    (GroupType::Year, "Mon année"),
];

#[component]
pub fn Community() -> Element {
    let manager = use_session();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut group = use_signal(GroupType::default);
    let mut search = use_signal(String::new);
    let mut discussions = use_signal(Vec::<Discussion>::new);

    // Reloads when the audience or the signed-in user changes
    let _loader = use_resource(move || {
        let manager = manager.clone();
        async move {
            let user = auth().user;
            let filters = community_filters(group(), user.as_ref(), None);
            match manager.client().discussions().list(&filters).await {
                Ok(items) => discussions.set(items),
                Err(e) => toast_error(&mut toasts, &e),
            }
        }
    });

    let term = search();
    let visible: Vec<Discussion> = discussions()
        .into_iter()
        .filter(|d| d.matches(&term))
        .collect();

    rsx! {
        section {
            h1 { "Communauté" }
            div {
                class: "community__groups",
                for (kind, label) in GROUPS {
                    button {
                        class: if group() == kind { "active" } else { "" },
                        onclick: move |_| group.set(kind),
                        "{label}"
                    }
                }
            }
            input {
                placeholder: "Rechercher...",
                value: "{search}",
                oninput: move |e| search.set(e.value()),
            }
            if visible.is_empty() {
                p { "Aucune discussion" }
            }
            for discussion in visible {
                article {
                    key: "{discussion.id}",
                    h3 { "{discussion.title}" }
                    p { "{discussion.content}" }
                    small { "{discussion.author_name} · {discussion.replies()} réponses" }
                }
            }
        }
    }
}
