//! # Firebase REST client
//!
//! Streamflix delegates credentials and per-user documents to Firebase. The
//! browser never talks to Firebase directly: server functions call the REST
//! endpoints below and keep the resulting ID token in the server session.
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`wire`] | — | Request/response bodies, Firestore value encoding, error-body mapping |
//! | `config` | `server` | [`FirebaseConfig`] read from the environment |
//! | `client` | `server` | [`FirebaseClient`]: `accounts:signUp`, `accounts:signInWithPassword`, document writes |

pub mod wire;

#[cfg(feature = "server")]
mod client;
#[cfg(feature = "server")]
mod config;

#[cfg(feature = "server")]
pub use client::FirebaseClient;
#[cfg(feature = "server")]
pub use config::FirebaseConfig;
