//! Session status types.

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the identity provider.
///
/// Safe to send to the client: it carries only the provider's opaque user id
/// and the email address the account was created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Opaque provider user id (Firebase `localId`).
    pub uid: String,
    pub email: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// What the application currently believes about the visitor.
///
/// `Pending` covers the window between start-up and the provider's first
/// session-change notification. It must not be read as "signed out".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Pending,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionStatus::Pending)
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionStatus::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

impl From<Option<Identity>> for SessionStatus {
    fn from(user: Option<Identity>) -> Self {
        match user {
            Some(identity) => SessionStatus::Authenticated(identity),
            None => SessionStatus::Unauthenticated,
        }
    }
}
