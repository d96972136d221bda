//! Server-side session bookkeeping for signed-in users.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{SessionData, SESSION_KEY};
