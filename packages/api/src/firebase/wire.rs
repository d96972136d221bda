//! Wire formats for the Identity Toolkit and Firestore REST APIs.

use identity::{AuthError, Identity, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body for `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

impl<'a> PasswordRequest<'a> {
    pub fn new(email: &'a str, password: &'a str) -> Self {
        Self {
            email,
            password,
            return_secure_token: true,
        }
    }
}

/// Successful response of the password endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub local_id: String,
    pub email: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Token lifetime in seconds, as a string.
    #[serde(default)]
    pub expires_in: String,
}

impl AuthResponse {
    pub fn identity(&self) -> Identity {
        Identity::new(self.local_id.clone(), self.email.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    /// gRPC-style status, set by Firestore.
    status: Option<String>,
}

/// Map a non-2xx response body to an [`AuthError`].
pub fn error_from_body(http_status: u16, body: &str) -> AuthError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return match http_status {
            429 => AuthError::TooManyRequests,
            401 | 403 => AuthError::PermissionDenied,
            _ => AuthError::Unknown(format!("HTTP {http_status}")),
        };
    };

    match envelope.error.status.as_deref() {
        Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED") => AuthError::PermissionDenied,
        _ => AuthError::from_code(&envelope.error.message),
    }
}

/// Encode a [`UserRecord`] as a Firestore document body.
pub fn record_document(record: &UserRecord) -> Value {
    let shows: Vec<Value> = record
        .saved_shows
        .iter()
        .map(|show| {
            let img = match &show.img {
                Some(path) => json!({ "stringValue": path }),
                None => json!({ "nullValue": null }),
            };
            json!({
                "mapValue": {
                    "fields": {
                        "id": { "integerValue": show.id.to_string() },
                        "title": { "stringValue": show.title },
                        "img": img,
                    }
                }
            })
        })
        .collect();

    json!({
        "fields": {
            "savedShows": { "arrayValue": { "values": shows } }
        }
    })
}
