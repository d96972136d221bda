//! Per-user saved-items document.

use serde::{Deserialize, Serialize};

/// A show bookmarked by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedShow {
    pub id: u64,
    pub title: String,
    /// TMDB backdrop path, e.g. "/abc123.jpg"
    pub img: Option<String>,
}

/// The document stored under `users/{email}` when an account is created.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "savedShows", default)]
    pub saved_shows: Vec<SavedShow>,
}

impl UserRecord {
    /// The collection name the records live in.
    pub fn collection() -> &'static str {
        "users"
    }
}
