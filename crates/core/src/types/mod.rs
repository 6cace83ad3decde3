//! Core types for the helpdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod principal;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{TicketId, UserId};
pub use principal::Principal;
pub use role::{Role, RoleError};
