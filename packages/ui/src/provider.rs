//! Client-side identity provider backed by the `api` server functions.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::ServerFnError;
use identity::{
    AuthError, Identity, IdentityProvider, Listener, Listeners, Subscription, UserRecord,
};

/// [`IdentityProvider`] that forwards every call to the server.
///
/// The server holds the Firebase session; this type republishes its outcome to
/// local listeners after each successful sign-in or sign-out, and once on
/// [`restore`](ServerProvider::restore) for the session the server already has.
#[derive(Clone, Default)]
pub struct ServerProvider {
    listeners: Listeners,
    /// Bumped on every sign-in, sign-up and sign-out notification.
    generation: Rc<Cell<u64>>,
}

impl ServerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the server who is signed in and notify listeners.
    ///
    /// An unreachable server is reported as signed out so the app leaves the
    /// pending state. The answer is dropped if the visitor signed in or out
    /// while it was in flight.
    pub async fn restore(&self) {
        let started = self.generation.get();
        let user = match api::current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to restore session: {}", e);
                None
            }
        };
        self.publish_restored(started, user.as_ref());
    }

    fn publish(&self, user: Option<&Identity>) {
        self.generation.set(self.generation.get() + 1);
        self.listeners.notify(user);
    }

    fn publish_restored(&self, started: u64, user: Option<&Identity>) {
        if self.generation.get() != started {
            tracing::debug!("discarding stale session restore");
            return;
        }
        self.listeners.notify(user);
    }
}

pub(crate) fn auth_error(e: ServerFnError) -> AuthError {
    if matches!(e, ServerFnError::Request(..)) {
        tracing::warn!("Server unreachable: {}", e);
        return AuthError::NetworkUnavailable;
    }
    AuthError::from_message(&e.to_string())
}

impl IdentityProvider for ServerProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = api::create_account(email.to_string(), password.to_string())
            .await
            .map_err(auth_error)?;
        self.publish(Some(&identity));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = api::login(email.to_string(), password.to_string())
            .await
            .map_err(auth_error)?;
        self.publish(Some(&identity));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        api::logout().await.map_err(auth_error)?;
        self.publish(None);
        Ok(())
    }

    fn on_session_changed(&self, listener: Listener) -> Subscription {
        self.listeners.add(listener)
    }

    async fn write_user_record(&self, key: &str, record: &UserRecord) -> Result<(), AuthError> {
        api::write_user_record(key.to_string(), record.clone())
            .await
            .map_err(auth_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_server_error_maps_to_auth_error() {
        let e = ServerFnError::new(AuthError::AccountAlreadyExists.wire());
        assert_eq!(auth_error(e), AuthError::AccountAlreadyExists);

        let e = ServerFnError::new(AuthError::InvalidCredentials.wire());
        assert_eq!(auth_error(e), AuthError::InvalidCredentials);
    }

    #[test]
    fn test_unreachable_server_is_network_unavailable() {
        let e = ServerFnError::Request(dioxus::fullstack::RequestError::Connect(
            "connection refused".to_string(),
        ));
        let error = auth_error(e);
        assert_eq!(error, AuthError::NetworkUnavailable);
        assert!(error.is_transient());
    }

    fn watch(provider: &ServerProvider) -> (Rc<RefCell<Vec<Option<Identity>>>>, Subscription) {
        let seen: Rc<RefCell<Vec<Option<Identity>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = provider.on_session_changed(Rc::new(move |user: Option<Identity>| {
            sink.borrow_mut().push(user);
        }));
        (seen, sub)
    }

    #[test]
    fn test_restore_after_sign_in_is_discarded() {
        let provider = ServerProvider::new();
        let (seen, _sub) = watch(&provider);
        let user = Identity::new("u1", "a@b.com");

        let started = provider.generation.get();
        provider.publish(Some(&user));
        provider.publish_restored(started, None);

        assert_eq!(*seen.borrow(), vec![Some(user)]);
    }

    #[test]
    fn test_restore_without_interleaving_is_published() {
        let provider = ServerProvider::new();
        let (seen, _sub) = watch(&provider);
        let user = Identity::new("u1", "a@b.com");

        let started = provider.generation.get();
        provider.publish_restored(started, Some(&user));

        assert_eq!(*seen.borrow(), vec![Some(user)]);
    }
}
