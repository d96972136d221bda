//! Account page, visible to signed-in users only.

use dioxus::prelude::*;
use ui::{use_session_status, LogoutButton, RequireSession};

#[component]
pub fn Account() -> Element {
    rsx! {
        RequireSession {
            AccountDetails {}
        }
    }
}

#[component]
fn AccountDetails() -> Element {
    let status = use_session_status();
    let email = status()
        .identity()
        .map(|identity| identity.email.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "account",
            h1 { class: "account-title", "My Shows" }
            p { class: "account-email", "Signed in as {email}" }
            LogoutButton { class: "account-logout", label: "Sign Out" }
        }
    }
}
