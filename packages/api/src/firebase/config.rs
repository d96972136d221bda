//! Firebase configuration from environment variables.

use reqwest::Url;

const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firebase project settings.
///
/// `FIREBASE_AUTH_URL` and `FIRESTORE_URL` only need setting when pointing at
/// the local emulator suite.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_url: String,
    pub firestore_url: String,
}

impl FirebaseConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| "FIREBASE_API_KEY not set")?;
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| "FIREBASE_PROJECT_ID not set")?;
        let auth_url = std::env::var("FIREBASE_AUTH_URL")
            .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string());
        let firestore_url = std::env::var("FIRESTORE_URL")
            .unwrap_or_else(|_| DEFAULT_FIRESTORE_URL.to_string());

        Ok(Self::new(api_key, project_id)
            .with_auth_url(auth_url)
            .with_firestore_url(firestore_url))
    }

    pub fn new(api_key: String, project_id: String) -> Self {
        Self {
            api_key,
            project_id,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
        }
    }

    pub fn with_auth_url(mut self, url: String) -> Self {
        self.auth_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_firestore_url(mut self, url: String) -> Self {
        self.firestore_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Identity Toolkit endpoint for `accounts:{method}`, keyed with the API key.
    pub fn accounts_url(&self, method: &str) -> Result<Url, String> {
        Url::parse_with_params(
            &format!("{}/accounts:{}", self.auth_url, method),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| e.to_string())
    }

    /// Firestore document URL for `{collection}/{key}`. The key is
    /// percent-encoded as a single path segment.
    pub fn document_url(&self, collection: &str, key: &str) -> Result<Url, String> {
        let mut url = Url::parse(&format!(
            "{}/projects/{}/databases/(default)/documents",
            self.firestore_url, self.project_id
        ))
        .map_err(|e| e.to_string())?;
        url.path_segments_mut()
            .map_err(|_| "Firestore URL cannot be a base".to_string())?
            .push(collection)
            .push(key);
        Ok(url)
    }
}
