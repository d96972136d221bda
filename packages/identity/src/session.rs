//! # Session — the application's single source of sign-in truth
//!
//! [`Session`] wraps an [`IdentityProvider`] and owns the current
//! [`SessionStatus`]. It is created once at application start and handed to the
//! views through the UI framework's context; there is no global state.
//!
//! ## State transitions
//!
//! The status starts as [`SessionStatus::Pending`] and changes only when the
//! provider's session-change listener fires. The listener is the single writer:
//! every notification overwrites the stored status (last write wins) and the
//! new value is stored before `on_change` observers see it. The direct results
//! of [`login`](Session::login) and [`logout`](Session::logout) are returned to
//! the caller but never written into the status.
//!
//! While [`create_account`](Session::create_account) runs, notifications are
//! held back and the latest one is applied after the saved-items record write
//! finishes, whether it succeeded or not. Views that react to the signed-in
//! status therefore never observe the new account before its record exists.
//!
//! ## Teardown
//!
//! [`teardown`](Session::teardown) drops the provider subscription; after it
//! runs, further notifications leave the status untouched. Dropping the
//! `Session` has the same effect.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AuthError;
use crate::listeners::{Listener, Subscription};
use crate::provider::IdentityProvider;
use crate::record::UserRecord;
use crate::status::{Identity, SessionStatus};

pub struct Session<P> {
    provider: P,
    status: Rc<RefCell<SessionStatus>>,
    apply: Listener,
    hold: Rc<RefCell<Hold>>,
    subscription: RefCell<Option<Subscription>>,
}

/// Notifications parked while an account is being set up.
#[derive(Default)]
struct Hold {
    depth: usize,
    parked: Option<Option<Identity>>,
}

impl Hold {
    /// Park `user` if a hold is active, otherwise hand it back for applying.
    fn intercept(&mut self, user: Option<Identity>) -> Option<Option<Identity>> {
        if self.depth == 0 {
            return Some(user);
        }
        self.parked = Some(user);
        None
    }
}

/// Releases a hold when dropped, including when the owning future is
/// cancelled part way through.
struct HoldGuard<'a, P>(&'a Session<P>);

impl<P> Drop for HoldGuard<'_, P> {
    fn drop(&mut self) {
        self.0.release();
    }
}

impl<P> Session<P> {
    fn hold(&self) -> HoldGuard<'_, P> {
        self.hold.borrow_mut().depth += 1;
        HoldGuard(self)
    }

    fn release(&self) {
        let parked = {
            let mut hold = self.hold.borrow_mut();
            hold.depth = hold.depth.saturating_sub(1);
            if hold.depth > 0 {
                return;
            }
            hold.parked.take()
        };
        // Torn-down sessions keep their last status
        if let Some(user) = parked {
            if self.subscription.borrow().is_some() {
                (self.apply)(user);
            }
        }
    }
}

impl<P: IdentityProvider> Session<P> {
    /// Subscribe to `provider` and start tracking its session.
    pub fn start(provider: P) -> Self {
        Self::start_with(provider, |_| {})
    }

    /// Like [`start`](Session::start), additionally calling `on_change` with
    /// every status applied from a notification.
    pub fn start_with(provider: P, on_change: impl Fn(&SessionStatus) + 'static) -> Self {
        let status = Rc::new(RefCell::new(SessionStatus::Pending));
        let sink = Rc::clone(&status);
        let apply: Listener = Rc::new(move |user: Option<Identity>| {
            let next = SessionStatus::from(user);
            tracing::debug!(?next, "session changed");
            *sink.borrow_mut() = next.clone();
            on_change(&next);
        });

        let hold = Rc::new(RefCell::new(Hold::default()));
        let gate = Rc::clone(&hold);
        let forward = Rc::clone(&apply);
        let subscription = provider.on_session_changed(Rc::new(move |user: Option<Identity>| {
            let ready = gate.borrow_mut().intercept(user);
            if let Some(user) = ready {
                forward(user);
            }
        }));

        Self {
            provider,
            status,
            apply,
            hold,
            subscription: RefCell::new(Some(subscription)),
        }
    }

    /// The latest status applied from the provider.
    pub fn current(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Create an account and its empty saved-items record.
    ///
    /// The record is keyed by `email` and written only after the provider
    /// accepted the credential. The provider's sign-in notification is applied
    /// once the write has finished. Failures are logged and returned.
    pub async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let _hold = self.hold();

        let identity = match self.provider.create_account(email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!("Account creation failed: {}", e);
                return Err(e);
            }
        };

        if let Err(e) = self
            .provider
            .write_user_record(email, &UserRecord::default())
            .await
        {
            tracing::error!("Failed to create saved-items record for {}: {}", email, e);
            return Err(e);
        }

        tracing::info!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    /// Sign in. The session status follows once the provider notifies.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.provider.sign_in(email, password).await
    }

    /// Sign out. The session status follows once the provider notifies.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }

    /// Stop listening to the provider. Idempotent.
    pub fn teardown(&self) {
        if self.subscription.borrow_mut().take().is_some() {
            tracing::debug!("session listener released");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{authorize, Access};
    use crate::memory::MemoryProvider;
    use std::cell::Cell;

    fn identity(uid: &str) -> Identity {
        Identity::new(uid, format!("{uid}@example.com"))
    }

    #[test]
    fn test_pending_before_first_notification() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider);

        let status = session.current();
        assert_eq!(status, SessionStatus::Pending);
        assert!(!status.is_authenticated());
        assert_ne!(status, SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_last_notification_wins() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider.clone());

        let sequences: Vec<Vec<Option<Identity>>> = vec![
            vec![None],
            vec![Some(identity("u1"))],
            vec![Some(identity("u1")), None],
            vec![None, Some(identity("u2")), Some(identity("u3"))],
            vec![Some(identity("u3")), Some(identity("u1")), None, Some(identity("u2"))],
        ];

        for sequence in sequences {
            for user in &sequence {
                provider.deliver(user.clone());
            }
            let expected = SessionStatus::from(sequence.last().cloned().flatten());
            assert_eq!(session.current(), expected);
        }
    }

    #[test]
    fn test_guard_follows_notifications() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider.clone());

        provider.deliver(None);
        assert_eq!(authorize(&session.current()), Access::Denied);

        provider.deliver(Some(identity("u1")));
        assert_eq!(authorize(&session.current()), Access::Granted(identity("u1")));

        provider.deliver(None);
        assert_eq!(authorize(&session.current()), Access::Denied);
    }

    #[test]
    fn test_on_change_sees_applied_status() {
        let provider = MemoryProvider::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let session = Session::start_with(provider.clone(), move |status| {
            assert!(status.is_authenticated());
            seen.set(seen.get() + 1);
        });

        provider.deliver(Some(identity("u1")));
        assert_eq!(calls.get(), 1);
        assert!(session.current().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejection_reaches_caller() {
        let provider = MemoryProvider::new();
        provider.add_account("a@b.com", "correct-horse");
        let session = Session::start(provider.clone());
        provider.deliver(None);

        let result = session.login("a@b.com", "secret").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(session.current(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_updates_status_through_notification() {
        let provider = MemoryProvider::new();
        provider.add_account("a@b.com", "secret");
        let session = Session::start(provider.clone());

        let identity = session.login("a@b.com", "secret").await.unwrap();
        assert_eq!(session.current(), SessionStatus::Authenticated(identity));

        session.logout().await.unwrap();
        assert_eq!(session.current(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_create_account_writes_one_empty_record() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider.clone());

        let identity = session.create_account("a@b.com", "secret").await.unwrap();
        assert_eq!(identity.email, "a@b.com");

        let writes = provider.record_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].key, "a@b.com");
        assert!(writes[0].record.saved_shows.is_empty());

        // Providers sign the new user in
        assert_eq!(session.current(), SessionStatus::Authenticated(identity));
    }

    #[tokio::test]
    async fn test_create_account_failure_writes_nothing() {
        let provider = MemoryProvider::new();
        provider.add_account("a@b.com", "secret");
        let session = Session::start(provider.clone());

        let result = session.create_account("a@b.com", "secret").await;
        assert_eq!(result, Err(AuthError::AccountAlreadyExists));

        let result = session.create_account("c@d.com", "123").await;
        assert_eq!(result, Err(AuthError::WeakPassword));

        let result = session.create_account("not-an-email", "secret").await;
        assert_eq!(result, Err(AuthError::InvalidEmail));

        assert!(provider.record_writes().is_empty());
    }

    #[tokio::test]
    async fn test_create_account_record_failure_is_returned() {
        let provider = MemoryProvider::new();
        provider.fail_record_writes(AuthError::PermissionDenied);
        let session = Session::start(provider.clone());

        let result = session.create_account("a@b.com", "secret").await;
        assert_eq!(result, Err(AuthError::PermissionDenied));
        assert!(provider.record_writes().is_empty());
    }

    #[tokio::test]
    async fn test_create_account_publishes_after_record_write() {
        let provider = MemoryProvider::new();
        let writes_seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&writes_seen);
        let observed = provider.clone();
        let session = Session::start_with(provider.clone(), move |status| {
            if status.is_authenticated() {
                sink.set(Some(observed.record_writes().len()));
            }
        });
        provider.deliver(None);

        session.create_account("a@b.com", "secret").await.unwrap();

        assert_eq!(writes_seen.get(), Some(1));
        assert_eq!(provider.record_writes().len(), 1);
        assert!(session.current().is_authenticated());
    }

    #[tokio::test]
    async fn test_create_account_publishes_when_record_write_fails() {
        let provider = MemoryProvider::new();
        provider.fail_record_writes(AuthError::PermissionDenied);
        let session = Session::start(provider.clone());
        provider.deliver(None);

        let result = session.create_account("a@b.com", "secret").await;
        assert_eq!(result, Err(AuthError::PermissionDenied));

        // The account exists and the provider signed it in
        assert_eq!(
            session.current(),
            SessionStatus::Authenticated(provider.current_user().unwrap())
        );
    }

    #[tokio::test]
    async fn test_notifications_flow_after_create_account() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider.clone());

        let _ = session.create_account("bad-email", "secret").await;
        assert_eq!(session.current(), SessionStatus::Pending);

        provider.deliver(Some(identity("u1")));
        assert_eq!(session.current(), SessionStatus::Authenticated(identity("u1")));
    }

    #[test]
    fn test_teardown_stops_updates() {
        let provider = MemoryProvider::new();
        let session = Session::start(provider.clone());
        provider.deliver(Some(identity("u1")));
        assert!(session.is_listening());

        session.teardown();
        assert!(!session.is_listening());
        assert_eq!(provider.listener_count(), 0);

        provider.deliver(None);
        assert_eq!(session.current(), SessionStatus::Authenticated(identity("u1")));

        // Second teardown is a no-op
        session.teardown();
    }

    #[test]
    fn test_drop_releases_listener() {
        let provider = MemoryProvider::new();
        {
            let _session = Session::start(provider.clone());
            assert_eq!(provider.listener_count(), 1);
        }
        assert_eq!(provider.listener_count(), 0);
    }
}
