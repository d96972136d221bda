//! Session context, hooks and route guard for the UI.

use std::ops::Deref;
use std::rc::Rc;

use dioxus::prelude::*;
use identity::{authorize, Access, Session, SessionStatus, LOGIN_PATH};

use crate::provider::ServerProvider;

/// The application's session, shared with every view through context.
#[derive(Clone)]
pub struct SessionHandle(Rc<Session<ServerProvider>>);

impl Deref for SessionHandle {
    type Target = Session<ServerProvider>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Get the current session status.
/// Returns a signal that updates whenever the provider reports a change.
pub fn use_session_status() -> Signal<SessionStatus> {
    use_context::<Signal<SessionStatus>>()
}

/// Get the session handle for `create_account`, `login` and `logout`.
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let status = use_signal(SessionStatus::default);

    let handle = use_hook(|| {
        let session = Session::start_with(ServerProvider::new(), move |next: &SessionStatus| {
            let mut status = status;
            status.set(next.clone());
        });
        SessionHandle(Rc::new(session))
    });

    // Pick up the session the server already holds
    let restoring = handle.clone();
    use_future(move || {
        let session = restoring.clone();
        async move { session.provider().restore().await }
    });

    let releasing = handle.clone();
    use_drop(move || releasing.teardown());

    use_context_provider(|| status);
    use_context_provider(|| handle);

    rsx! {
        {children}
    }
}

/// Renders `children` only for a signed-in user.
///
/// While the session is still pending a placeholder is shown; signed-out
/// visitors are sent to the login page.
#[component]
pub fn RequireSession(children: Element) -> Element {
    let status = use_session_status();
    let nav = use_navigator();

    use_effect(move || {
        if authorize(&status()) == Access::Denied {
            nav.replace(LOGIN_PATH);
        }
    });

    match authorize(&status()) {
        Access::Granted(_) => rsx! {
            {children}
        },
        Access::Pending => rsx! {
            div { class: "session-pending", "Loading..." }
        },
        Access::Denied => rsx! {},
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let nav = use_navigator();

    let onclick = move |_| {
        let session = session.clone();
        async move {
            match session.logout().await {
                Ok(()) => {
                    nav.push("/");
                }
                Err(e) => tracing::error!("Failed to log out: {}", e),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
