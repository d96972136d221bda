//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_session, use_session_status, LogoutButton, RequireSession, SessionHandle, SessionProvider};

mod provider;
pub use provider::ServerProvider;

mod navbar;
pub use navbar::Navbar;

mod hero;
pub use hero::Hero;

mod row;
pub use row::{use_row, CategoryRow, Row};
