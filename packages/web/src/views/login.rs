//! Sign-in page.

use dioxus::prelude::*;
use ui::{use_auth, SignInForm};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already signed in (or just signed in): back to the home page
    use_effect(move || {
        if auth().is_signed_in() {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        section {
            h1 { "Connexion" }
            SignInForm {}
            p {
                "Pas encore de compte ? "
                Link { to: Route::Register {}, "S'inscrire" }
            }
        }
    }
}
