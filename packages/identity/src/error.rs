//! # Authentication errors
//!
//! [`AuthError`] is the user-facing error kind for every provider call. The
//! identity provider reports failures as short codes: the Firebase REST API uses
//! `EMAIL_EXISTS`, `INVALID_PASSWORD`, `WEAK_PASSWORD : Password should be...`
//! and friends, while the JS SDK uses `auth/email-already-in-use` style codes.
//! Both spellings map onto the same variants through [`AuthError::from_code`].
//!
//! Server functions carry errors across the wire as the string returned by
//! [`AuthError::wire`]; the client recovers the variant with
//! [`AuthError::from_message`], which tolerates the surrounding text the
//! transport adds.

use thiserror::Error;

/// Why an identity-provider call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    AccountAlreadyExists,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("Too many attempts, try again later")]
    TooManyRequests,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Network unavailable")]
    NetworkUnavailable,
    #[error("{0}")]
    Unknown(String),
}

/// Codes recognised by [`AuthError::from_message`], longest first so that a
/// scan never stops on a code that is a prefix of another.
const KNOWN_CODES: &[&str] = &[
    "auth/invalid-login-credentials",
    "auth/network-request-failed",
    "TOO_MANY_ATTEMPTS_TRY_LATER",
    "auth/email-already-in-use",
    "INVALID_LOGIN_CREDENTIALS",
    "auth/too-many-requests",
    "auth/invalid-credential",
    "NETWORK_REQUEST_FAILED",
    "auth/user-not-found",
    "auth/wrong-password",
    "INVALID_CREDENTIALS",
    "auth/weak-password",
    "auth/invalid-email",
    "auth/user-disabled",
    "PERMISSION_DENIED",
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "INVALID_EMAIL",
    "WEAK_PASSWORD",
    "USER_DISABLED",
    "EMAIL_EXISTS",
];

impl AuthError {
    /// Stable code for this error, in the provider's REST spelling.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountAlreadyExists => "EMAIL_EXISTS",
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::WeakPassword => "WEAK_PASSWORD",
            AuthError::TooManyRequests => "TOO_MANY_ATTEMPTS_TRY_LATER",
            AuthError::PermissionDenied => "PERMISSION_DENIED",
            AuthError::NetworkUnavailable => "NETWORK_REQUEST_FAILED",
            AuthError::Unknown(_) => "UNKNOWN",
        }
    }

    /// String to send across a server function boundary.
    pub fn wire(&self) -> String {
        match self {
            AuthError::Unknown(message) => message.clone(),
            other => other.code().to_string(),
        }
    }

    /// Map a single provider error code to an error kind.
    ///
    /// Firebase appends details after `" : "` (`WEAK_PASSWORD : Password should
    /// be at least 6 characters`); only the part before it is inspected.
    pub fn from_code(code: &str) -> Self {
        let head = code.split(" : ").next().unwrap_or(code).trim();
        match head {
            "EMAIL_EXISTS" | "auth/email-already-in-use" => AuthError::AccountAlreadyExists,
            "INVALID_CREDENTIALS"
            | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_PASSWORD"
            | "EMAIL_NOT_FOUND"
            | "USER_DISABLED"
            | "auth/invalid-credential"
            | "auth/invalid-login-credentials"
            | "auth/wrong-password"
            | "auth/user-not-found"
            | "auth/user-disabled" => AuthError::InvalidCredentials,
            "INVALID_EMAIL" | "auth/invalid-email" => AuthError::InvalidEmail,
            "WEAK_PASSWORD" | "auth/weak-password" => AuthError::WeakPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" | "auth/too-many-requests" => {
                AuthError::TooManyRequests
            }
            "PERMISSION_DENIED" => AuthError::PermissionDenied,
            "NETWORK_REQUEST_FAILED" | "auth/network-request-failed" => {
                AuthError::NetworkUnavailable
            }
            other => AuthError::Unknown(other.to_string()),
        }
    }

    /// Recover an error kind from a message that embeds a provider code
    /// somewhere inside it.
    pub fn from_message(message: &str) -> Self {
        KNOWN_CODES
            .iter()
            .find(|code| message.contains(*code))
            .map(|code| AuthError::from_code(code))
            .unwrap_or_else(|| AuthError::Unknown(message.trim().to_string()))
    }

    /// Whether retrying the same call later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuthError::NetworkUnavailable | AuthError::TooManyRequests
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_codes() {
        assert_eq!(AuthError::from_code("EMAIL_EXISTS"), AuthError::AccountAlreadyExists);
        assert_eq!(AuthError::from_code("INVALID_PASSWORD"), AuthError::InvalidCredentials);
        assert_eq!(AuthError::from_code("EMAIL_NOT_FOUND"), AuthError::InvalidCredentials);
        assert_eq!(
            AuthError::from_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword
        );
        assert_eq!(
            AuthError::from_code("TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"),
            AuthError::TooManyRequests
        );
    }

    #[test]
    fn test_sdk_codes() {
        assert_eq!(
            AuthError::from_code("auth/email-already-in-use"),
            AuthError::AccountAlreadyExists
        );
        assert_eq!(AuthError::from_code("auth/wrong-password"), AuthError::InvalidCredentials);
        assert_eq!(AuthError::from_code("auth/invalid-email"), AuthError::InvalidEmail);
        assert_eq!(
            AuthError::from_code("auth/network-request-failed"),
            AuthError::NetworkUnavailable
        );
    }

    #[test]
    fn test_unrecognised_code_is_unknown() {
        assert_eq!(
            AuthError::from_code("OPERATION_NOT_ALLOWED"),
            AuthError::Unknown("OPERATION_NOT_ALLOWED".to_string())
        );
    }

    #[test]
    fn test_wire_survives_transport_wrapping() {
        let wrapped = format!(
            "error running server function: {} (details: None)",
            AuthError::AccountAlreadyExists.wire()
        );
        assert_eq!(AuthError::from_message(&wrapped), AuthError::AccountAlreadyExists);

        let wrapped = format!("Server error: {}", AuthError::InvalidCredentials.wire());
        assert_eq!(AuthError::from_message(&wrapped), AuthError::InvalidCredentials);

        let unknown = AuthError::Unknown("Firebase is not configured".to_string());
        assert_eq!(AuthError::from_message(&unknown.wire()), unknown);
    }

    #[test]
    fn test_transient() {
        assert!(AuthError::NetworkUnavailable.is_transient());
        assert!(AuthError::TooManyRequests.is_transient());
        assert!(!AuthError::InvalidCredentials.is_transient());
        assert!(!AuthError::Unknown("boom".to_string()).is_transient());
    }
}
