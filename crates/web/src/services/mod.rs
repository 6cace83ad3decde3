//! Business logic between the route handlers and the repositories.

pub mod auth;
pub mod session;
pub mod tickets;

pub use auth::{AuthError, AuthService};
pub use session::{SessionError, SessionManager};
pub use tickets::TicketService;
