//! The contract every identity backend fulfils.

use std::future::Future;

use crate::error::AuthError;
use crate::listeners::{Listener, Subscription};
use crate::record::UserRecord;
use crate::status::Identity;

/// An external authentication and per-user document service.
///
/// Sign-in and sign-out report their outcome twice: once through the returned
/// future, and once through the session-change listeners. Only the listener
/// path is authoritative for the session state.
pub trait IdentityProvider {
    /// Create an email/password credential. Providers sign the new user in.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, AuthError>>;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    /// Register for session-change notifications until the returned handle is
    /// dropped.
    fn on_session_changed(&self, listener: Listener) -> Subscription;

    /// Write the per-user document stored under `key`.
    fn write_user_record(
        &self,
        key: &str,
        record: &UserRecord,
    ) -> impl Future<Output = Result<(), AuthError>>;
}
