//! Request middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth, gate};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, session_key};
