//! Domain models for the web application.

pub mod session;
pub mod ticket;
pub mod user;

pub use session::keys as session_keys;
pub use ticket::TicketListItem;
pub use user::User;
