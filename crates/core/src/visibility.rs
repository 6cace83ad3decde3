//! Ticket visibility policy.
//!
//! | Role  | Visible tickets                                     |
//! |-------|-----------------------------------------------------|
//! | ADMIN | all                                                 |
//! | AGENT | `assigned_to = principal` or `assigned_to IS NULL`  |
//! | USER  | `created_by = principal`                            |
//!
//! The database layer turns a [`TicketScope`] into a `WHERE` clause;
//! [`TicketScope::permits`] evaluates the same rule in memory.

use crate::types::{Principal, Role, UserId};

/// The subset of tickets a principal may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Every ticket.
    All,
    /// Tickets assigned to this user, plus unassigned tickets.
    AssignedOrUnassigned(UserId),
    /// Tickets created by this user.
    CreatedBy(UserId),
}

/// The ownership columns of a ticket, as far as visibility is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketOwnership {
    /// Creator (always set).
    pub created_by: UserId,
    /// Assignee, if any.
    pub assigned_to: Option<UserId>,
}

impl TicketScope {
    /// Scope for a known role.
    #[must_use]
    pub const fn for_role(role: Role, user_id: UserId) -> Self {
        match role {
            Role::Admin => Self::All,
            Role::Agent => Self::AssignedOrUnassigned(user_id),
            Role::User => Self::CreatedBy(user_id),
        }
    }

    /// Scope for an authenticated principal.
    #[must_use]
    pub const fn for_principal(principal: &Principal) -> Self {
        Self::for_role(principal.role, principal.id)
    }

    /// Scope for a role string read straight from storage.
    ///
    /// A value that is not a known role gets the most restrictive scope,
    /// the same as `USER`.
    #[must_use]
    pub fn for_stored_role(user_id: UserId, stored_role: &str) -> Self {
        match stored_role.parse::<Role>() {
            Ok(role) => Self::for_role(role, user_id),
            Err(_) => Self::CreatedBy(user_id),
        }
    }

    /// Whether a ticket falls inside this scope.
    #[must_use]
    pub fn permits(&self, ticket: &TicketOwnership) -> bool {
        match *self {
            Self::All => true,
            Self::AssignedOrUnassigned(agent) => {
                ticket.assigned_to.is_none_or(|assignee| assignee == agent)
            }
            Self::CreatedBy(user) => ticket.created_by == user,
        }
    }
}

/// Whether a role may open tickets. Every authenticated role can.
#[must_use]
pub const fn can_create_ticket(role: Role) -> bool {
    match role {
        Role::Admin | Role::Agent | Role::User => true,
    }
}
