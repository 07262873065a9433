use dioxus::prelude::*;

use ui::{LogoutButton, NotificationBell, SessionProvider, SignedIn, ToastProvider};
use views::{Community, Home, Login, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/community")]
        Community {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    init_tracing();

    dioxus::launch(App);
}

/// Native builds log through `tracing-subscriber`, filtered by `RUST_LOG`.
#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api=debug"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging already initialised: {e}");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        style { {APP_CSS} }

        ToastProvider {
            SessionProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Header shared by every page.
#[component]
fn Shell() -> Element {
    let auth = ui::use_auth();

    rsx! {
        header {
            class: "app-header",
            Link { to: Route::Home {}, class: "app-header__brand", "UnivLoop" }
            Link { to: Route::Community {}, "Communauté" }
            div {
                class: "app-header__session",
                if auth().loading {
                    span { class: "app-header__muted", "..." }
                } else {
                    SignedIn {
                        fallback: rsx! {
                            Link { to: Route::Login {}, "Se connecter" }
                            Link { to: Route::Register {}, "S'inscrire" }
                        },
                        NotificationBell {}
                        span {
                            class: "app-header__user",
                            {auth().user.map(|user| user.name).unwrap_or_default()}
                        }
                        LogoutButton { class: "app-header__logout" }
                    }
                }
            }
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
    }
}

const APP_CSS: &str = r#"
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; color: #1f2937; }
.app-header { display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.5rem; border-bottom: 1px solid #e5e7eb; }
.app-header__brand { font-weight: 700; color: #3B82F6; text-decoration: none; }
.app-header__session { margin-left: auto; display: flex; align-items: center; gap: 0.75rem; }
.app-header__muted { color: #9ca3af; }
.app-main { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
.auth-form { display: flex; flex-direction: column; gap: 0.5rem; max-width: 320px; }
.auth-form__error { color: #dc2626; margin: 0; }
.toast-viewport { position: fixed; bottom: 1rem; right: 1rem; display: flex; flex-direction: column; gap: 0.5rem; }
.toast { display: flex; flex-direction: column; padding: 0.75rem 1rem; border-radius: 6px; color: white; cursor: pointer; min-width: 240px; }
.toast--error { background: #dc2626; }
.toast--success { background: #16a34a; }
.toast--info { background: #2563eb; }
.notification-bell { position: relative; }
.notification-bell__badge { background: #dc2626; color: white; border-radius: 999px; padding: 0 0.4rem; font-size: 0.75rem; margin-left: 0.25rem; }
.notification-bell__list { position: absolute; right: 0; top: 2rem; width: 320px; list-style: none; margin: 0; padding: 0.5rem; background: white; border: 1px solid #e5e7eb; border-radius: 6px; }
.notification.unread { font-weight: 600; }
.startup-error { padding: 2rem; color: #dc2626; }
"#;
