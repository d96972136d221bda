//! HTTP calls to the Firebase REST endpoints.

use identity::{AuthError, UserRecord};
use reqwest::{Client, Response};

use super::config::FirebaseConfig;
use super::wire::{error_from_body, record_document, AuthResponse, PasswordRequest};

/// Firebase Authentication + Firestore client.
pub struct FirebaseClient {
    config: FirebaseConfig,
    http: Client,
}

impl FirebaseClient {
    /// Create a client from environment variables.
    pub fn new() -> Result<Self, String> {
        let config = FirebaseConfig::from_env()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: FirebaseConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create an email/password account. Firebase signs the new user in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        self.password_call("signUp", email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        self.password_call("signInWithPassword", email, password)
            .await
    }

    /// Overwrite `{collection}/{key}` with `record`, authorised as the owner of
    /// `id_token`.
    pub async fn set_user_record(
        &self,
        id_token: &str,
        key: &str,
        record: &UserRecord,
    ) -> Result<(), AuthError> {
        let url = self
            .config
            .document_url(UserRecord::collection(), key)
            .map_err(AuthError::Unknown)?;

        let response = self
            .http
            .patch(url)
            .bearer_auth(id_token)
            .json(&record_document(record))
            .send()
            .await
            .map_err(transport_error)?;

        check(response).await.map(|_| ())
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let url = self
            .config
            .accounts_url(method)
            .map_err(AuthError::Unknown)?;

        let response = self
            .http
            .post(url)
            .json(&PasswordRequest::new(email, password))
            .send()
            .await
            .map_err(transport_error)?;

        check(response)
            .await?
            .json::<AuthResponse>()
            .await
            .map_err(|e| AuthError::Unknown(format!("Invalid auth response: {}", e)))
    }
}

/// Pass 2xx responses through, map everything else to an [`AuthError`].
async fn check(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = error_from_body(status.as_u16(), &body);
    tracing::warn!(%status, code = error.code(), "Firebase request failed");
    Err(error)
}

fn transport_error(e: reqwest::Error) -> AuthError {
    if e.is_connect() || e.is_timeout() {
        AuthError::NetworkUnavailable
    } else {
        AuthError::Unknown(e.to_string())
    }
}
