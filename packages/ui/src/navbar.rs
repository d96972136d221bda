use dioxus::prelude::*;
use identity::SessionStatus;

use crate::auth::{use_session_status, LogoutButton};

/// Top bar with the brand and the session-dependent actions.
///
/// Shows nothing on the right while the session is still pending, so a
/// returning user never sees the signed-out buttons flash.
#[component]
pub fn Navbar() -> Element {
    let status = use_session_status();

    let actions = match status() {
        SessionStatus::Pending => rsx! {},
        SessionStatus::Authenticated(_) => rsx! {
            Link { class: "navbar-link", to: "/account", "Account" }
            LogoutButton { class: "navbar-button" }
        },
        SessionStatus::Unauthenticated => rsx! {
            Link { class: "navbar-link", to: "/login", "Sign In" }
            Link { class: "navbar-button", to: "/register", "Sign Up" }
        },
    };

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar-brand", to: "/", "STREAMFLIX" }
            div { class: "navbar-actions", {actions} }
        }
    }
}
