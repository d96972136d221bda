//! Session data types.

use identity::{AuthError, Identity};
use serde::{Deserialize, Serialize};

use crate::firebase::wire::AuthResponse;

/// Key the signed-in user is stored under in the session store.
pub const SESSION_KEY: &str = "firebase_user";

/// What the server remembers about a signed-in visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub uid: String,
    pub email: String,
    /// Firebase ID token used to authorise Firestore writes.
    pub id_token: String,
    /// Set at sign-up until the saved-items record has been written.
    #[serde(default)]
    pub record_pending: bool,
}

impl SessionData {
    pub fn identity(&self) -> Identity {
        Identity::new(self.uid.clone(), self.email.clone())
    }

    /// Check that `key` may receive the initial saved-items record.
    ///
    /// Only the account that signed up in this session may write it, and only
    /// until the write has succeeded once.
    pub fn authorize_record(&self, key: &str) -> Result<(), AuthError> {
        if !self.record_pending || !self.email.eq_ignore_ascii_case(key.trim()) {
            return Err(AuthError::PermissionDenied);
        }
        Ok(())
    }

    /// Load the signed-in user from `session`, if any.
    pub async fn load(session: &tower_sessions::Session) -> Result<Option<Self>, String> {
        session
            .get::<SessionData>(SESSION_KEY)
            .await
            .map_err(|e| e.to_string())
    }

    /// Store this user in `session`, rotating the session id first.
    pub async fn save(&self, session: &tower_sessions::Session) -> Result<(), String> {
        session.cycle_id().await.map_err(|e| e.to_string())?;
        session
            .insert(SESSION_KEY, self)
            .await
            .map_err(|e| e.to_string())
    }

    /// Overwrite the stored user without rotating the session id.
    pub async fn update(&self, session: &tower_sessions::Session) -> Result<(), String> {
        session
            .insert(SESSION_KEY, self)
            .await
            .map_err(|e| e.to_string())
    }
}

impl From<&AuthResponse> for SessionData {
    fn from(response: &AuthResponse) -> Self {
        Self {
            uid: response.local_id.clone(),
            email: response.email.clone(),
            id_token: response.id_token.clone(),
            record_pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_up(email: &str) -> SessionData {
        SessionData {
            uid: "u1".to_string(),
            email: email.to_string(),
            id_token: "token".to_string(),
            record_pending: true,
        }
    }

    #[test]
    fn test_record_only_for_own_email() {
        let data = signed_up("a@b.com");
        assert_eq!(data.authorize_record("A@B.com "), Ok(()));
        assert_eq!(
            data.authorize_record("c@d.com"),
            Err(AuthError::PermissionDenied)
        );
    }

    #[test]
    fn test_record_written_once() {
        let mut data = signed_up("a@b.com");
        data.record_pending = false;
        assert_eq!(
            data.authorize_record("a@b.com"),
            Err(AuthError::PermissionDenied)
        );
    }

    #[test]
    fn test_stored_sessions_without_flag_cannot_write() {
        let stored = r#"{"uid":"u1","email":"a@b.com","id_token":"token"}"#;
        let data: SessionData = serde_json::from_str(stored).unwrap();
        assert!(!data.record_pending);
        assert!(data.authorize_record("a@b.com").is_err());
    }
}
