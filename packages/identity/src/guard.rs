//! Route guard for views that require a signed-in user.

use crate::status::{Identity, SessionStatus};

/// Path unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of checking a protected route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the protected view for this user.
    Granted(Identity),
    /// The provider has not reported yet; show a placeholder.
    Pending,
    /// Redirect to [`LOGIN_PATH`].
    Denied,
}

/// Decide whether a protected view may render. Pure and synchronous; callers
/// re-run it whenever the session changes.
pub fn authorize(status: &SessionStatus) -> Access {
    match status {
        SessionStatus::Authenticated(identity) => Access::Granted(identity.clone()),
        SessionStatus::Pending => Access::Pending,
        SessionStatus::Unauthenticated => Access::Denied,
    }
}
