//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::{use_session, use_session_status};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let status = use_session_status();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the catalog
    use_effect(move || {
        if status().is_authenticated() {
            nav.replace(Route::Home {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();

            if e.is_empty() || p.is_empty() {
                error.set(Some("Please enter your email and password".to_string()));
                return;
            }

            loading.set(true);
            match session.login(&e, &p).await {
                Ok(_) => {
                    nav.push(Route::Home {});
                }
                Err(err) => {
                    tracing::warn!(code = err.code(), "Sign-in rejected");
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
                h1 { class: "auth-title", "Sign In" }

                form {
                    onsubmit: handle_login,
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
                        placeholder: "Password",
                        autocomplete: "current-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    button {
                        class: "auth-submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }

                p {
                    class: "auth-switch",
                    span { "New to Streamflix? " }
                    Link { to: Route::Register {}, "Sign Up" }
                }
            }
        }
    }
}
