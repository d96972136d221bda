//! # Identity crate — session state for Streamflix
//!
//! Framework-free core shared by the `api`, `ui` and `web` crates. It owns the
//! one piece of decision logic in the application: what the app believes about
//! the visitor's sign-in state, and whether the protected account view may
//! render.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`status`] | [`Identity`] and the three-valued [`SessionStatus`] |
//! | [`error`] | [`AuthError`] and the mapping from provider error codes |
//! | [`record`] | The per-user saved-items document written at sign-up |
//! | [`listeners`] | Session-change listener registry and the [`Subscription`] handle |
//! | [`provider`] | The [`IdentityProvider`] trait every auth backend implements |
//! | [`session`] | [`Session`], the single owner of the current [`SessionStatus`] |
//! | [`guard`] | The route guard predicate |
//! | `memory` | [`MemoryProvider`], an in-process backend for tests and offline use |

pub mod error;
pub mod guard;
pub mod listeners;
pub mod provider;
pub mod record;
pub mod session;
pub mod status;

mod memory;
pub use memory::{MemoryProvider, RecordWrite};

pub use error::AuthError;
pub use guard::{authorize, Access, LOGIN_PATH};
pub use listeners::{Listener, Listeners, Subscription};
pub use provider::IdentityProvider;
pub use record::{SavedShow, UserRecord};
pub use session::Session;
pub use status::{Identity, SessionStatus};
