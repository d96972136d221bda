//! # API crate — fullstack server functions for Streamflix
//!
//! Defines every Dioxus server function the web frontend calls. Credentials and
//! per-user documents are delegated to Firebase; the server keeps the signed-in
//! user (including the Firebase ID token) in a `tower-sessions` session so the
//! browser only ever holds a session cookie.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Session data stored for a signed-in visitor |
//! | [`catalog`] | — | Landing-page rows and the TMDB client (`server`) |
//! | [`firebase`] | — | Firebase REST wire types and client (`server`) |
//!
//! ## Server functions exposed here
//!
//! - **Authentication**: `current_user`, `create_account`, `login`, `logout`
//! - **User records**: `write_user_record`
//! - **Catalog**: `fetch_row`
//!
//! Authentication failures travel as [`AuthError::wire`] strings; clients turn
//! them back into an [`AuthError`] with [`AuthError::from_message`].

use dioxus::prelude::*;

pub mod auth;
pub mod catalog;
pub mod firebase;

pub use catalog::{Category, Show};
pub use identity::{AuthError, Identity, UserRecord};

#[cfg(feature = "server")]
fn auth_failure(e: AuthError) -> ServerFnError {
    ServerFnError::new(e.wire())
}

#[cfg(feature = "server")]
fn firebase_client() -> Result<firebase::FirebaseClient, ServerFnError> {
    firebase::FirebaseClient::new().map_err(|e| {
        tracing::error!("Firebase is not configured: {}", e);
        ServerFnError::new(e)
    })
}

/// Get the signed-in user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn current_user() -> Result<Option<Identity>, ServerFnError> {
    let data = auth::SessionData::load(&session)
        .await
        .map_err(ServerFnError::new)?;

    Ok(data.map(|d| d.identity()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn current_user() -> Result<Option<Identity>, ServerFnError> {
    Ok(None)
}

/// Create an email/password account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn create_account(email: String, password: String) -> Result<Identity, ServerFnError> {
    let client = firebase_client()?;

    let response = client
        .sign_up(email.trim(), &password)
        .await
        .map_err(auth_failure)?;

    let mut data = auth::SessionData::from(&response);
    data.record_pending = true;
    data.save(&session).await.map_err(ServerFnError::new)?;

    tracing::info!(uid = %data.uid, "account created");
    Ok(data.identity())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn create_account(email: String, password: String) -> Result<Identity, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<Identity, ServerFnError> {
    let client = firebase_client()?;

    let response = client
        .sign_in(email.trim(), &password)
        .await
        .map_err(auth_failure)?;

    let data = auth::SessionData::from(&response);
    data.save(&session).await.map_err(ServerFnError::new)?;

    tracing::info!(uid = %data.uid, "signed in");
    Ok(data.identity())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<Identity, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Write the saved-items record for the account created in this session.
///
/// The record key must be the session's email address, and the write is
/// accepted once per sign-up.
#[cfg(feature = "server")]
#[post("/api/users/record", session: tower_sessions::Session)]
pub async fn write_user_record(key: String, record: UserRecord) -> Result<(), ServerFnError> {
    let Some(mut data) = auth::SessionData::load(&session)
        .await
        .map_err(ServerFnError::new)?
    else {
        return Err(auth_failure(AuthError::PermissionDenied));
    };

    if let Err(e) = data.authorize_record(&key) {
        tracing::warn!(uid = %data.uid, "refusing saved-items record write");
        return Err(auth_failure(e));
    }

    firebase_client()?
        .set_user_record(&data.id_token, &data.email, &record)
        .await
        .map_err(auth_failure)?;

    data.record_pending = false;
    data.update(&session).await.map_err(ServerFnError::new)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/record")]
pub async fn write_user_record(key: String, record: UserRecord) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch one landing-page row.
#[cfg(feature = "server")]
#[post("/api/catalog/row")]
pub async fn fetch_row(category: Category) -> Result<Vec<Show>, ServerFnError> {
    let client = catalog::TmdbClient::new().map_err(|e| {
        tracing::error!("TMDB is not configured: {}", e);
        ServerFnError::new(e)
    })?;

    client.fetch_row(category).await.map_err(|e| {
        tracing::warn!(?category, "Failed to fetch row: {}", e);
        ServerFnError::new(e)
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/catalog/row")]
pub async fn fetch_row(category: Category) -> Result<Vec<Show>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
