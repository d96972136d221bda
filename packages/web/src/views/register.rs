//! Registration page view with email/password form.

use dioxus::prelude::*;
use ui::{use_session, use_session_status};

use crate::Route;

/// Shortest password the identity provider accepts.
const MIN_PASSWORD_LEN: usize = 6;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let session = use_session();
    let status = use_session_status();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Signed-in visitors have nothing to register; a fresh sign-up lands here
    // too once the provider reports the new user.
    use_effect(move || {
        if status().is_authenticated() {
            nav.replace(Route::Home {});
        }
    });

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();

            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.chars().count() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                )));
                return;
            }

            loading.set(true);
            match session.create_account(&e, &p).await {
                Ok(_) => {
                    nav.push(Route::Home {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div { class: "auth-shade" }
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Sign Up" }

                form {
                    onsubmit: handle_register,
                    class: "auth-form",

                    if let Some(err) = error() {
                        div { class: "auth-error", "{err}" }
                    }

                    input {
                        class: "auth-input",
                        r#type: "email",
                        placeholder: "Email",
                        autocomplete: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        class: "auth-input",
                        r#type: "password",
                        placeholder: "Password (min 6 characters)",
                        autocomplete: "new-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    button {
                        class: "auth-submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign Up" }
                    }
                }

                p {
                    class: "auth-switch",
                    span { "Already subscribed to Streamflix? " }
                    Link { to: Route::Login {}, "Sign In" }
                }
            }
        }
    }
}
