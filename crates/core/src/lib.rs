//! Helpdesk Core - Shared domain types.
//!
//! This crate provides the types used across all helpdesk components:
//! - `web` - The HTTP application (login, dashboard, tickets)
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure decision logic - no I/O, no
//! database access, no HTTP. The per-role ticket visibility rule lives here so
//! it can be tested without a database and reused by every front end.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, emails, roles and the authenticated principal
//! - [`ticket`] - Ticket input validation
//! - [`visibility`] - Which tickets a principal may see
//! - [`outcome`] - Transport-independent result of a handler-level operation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod outcome;
pub mod ticket;
pub mod types;
pub mod visibility;

pub use outcome::{Flash, FlashLevel, NextAction, Outcome, OutcomeKind, Route};
pub use ticket::{NewTicket, TicketValidationError};
pub use types::*;
pub use visibility::{TicketOwnership, TicketScope, can_create_ticket};
