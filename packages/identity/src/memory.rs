use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AuthError;
use crate::listeners::{Listener, Listeners, Subscription};
use crate::provider::IdentityProvider;
use crate::record::UserRecord;
use crate::status::Identity;

/// Minimum password length the hosted provider enforces.
const MIN_PASSWORD_LEN: usize = 6;

/// A document write observed by [`MemoryProvider`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordWrite {
    pub key: String,
    pub record: UserRecord,
}

#[derive(Default)]
struct State {
    /// email -> (uid, password)
    accounts: HashMap<String, (String, String)>,
    records: Vec<RecordWrite>,
    record_failure: Option<AuthError>,
    current: Option<Identity>,
    next_uid: u64,
}

/// In-memory IdentityProvider for testing and offline development.
///
/// Applies the same account rules as the hosted provider (email must contain
/// `@`, passwords of at least six characters, one account per email) and
/// notifies listeners on every sign-in and sign-out.
#[derive(Clone, Default)]
pub struct MemoryProvider {
    state: Rc<RefCell<State>>,
    listeners: Listeners,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing account without signing it in.
    pub fn add_account(&self, email: &str, password: &str) -> Identity {
        let mut state = self.state.borrow_mut();
        let uid = format!("uid-{}", state.next_uid);
        state.next_uid += 1;
        state
            .accounts
            .insert(email.to_string(), (uid.clone(), password.to_string()));
        Identity::new(uid, email)
    }

    /// Push a session-change notification as if the provider emitted it.
    pub fn deliver(&self, user: Option<Identity>) {
        self.state.borrow_mut().current = user.clone();
        self.listeners.notify(user.as_ref());
    }

    /// Make every following record write fail with `error`.
    pub fn fail_record_writes(&self, error: AuthError) {
        self.state.borrow_mut().record_failure = Some(error);
    }

    /// Successful record writes, in order.
    pub fn record_writes(&self) -> Vec<RecordWrite> {
        self.state.borrow().records.clone()
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.state.borrow().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl IdentityProvider for MemoryProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.state.borrow().accounts.contains_key(email) {
            return Err(AuthError::AccountAlreadyExists);
        }

        let identity = self.add_account(email, password);
        self.deliver(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = {
            let state = self.state.borrow();
            match state.accounts.get(email) {
                Some((uid, stored)) if stored == password => Identity::new(uid.clone(), email),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };

        self.deliver(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.deliver(None);
        Ok(())
    }

    fn on_session_changed(&self, listener: Listener) -> Subscription {
        self.listeners.add(listener)
    }

    async fn write_user_record(&self, key: &str, record: &UserRecord) -> Result<(), AuthError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.record_failure.clone() {
            return Err(error);
        }
        state.records.push(RecordWrite {
            key: key.to_string(),
            record: record.clone(),
        });
        Ok(())
    }
}
