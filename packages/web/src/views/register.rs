//! Registration page.

use dioxus::prelude::*;
use ui::{use_auth, RegisterForm};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if auth().is_signed_in() {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        section {
            h1 { "Créer un compte" }
            RegisterForm {}
            p {
                "Déjà inscrit ? "
                Link { to: Route::Login {}, "Se connecter" }
            }
        }
    }
}
