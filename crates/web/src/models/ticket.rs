//! Ticket read model.

use chrono::{DateTime, Utc};
use helpdesk_core::{TicketId, TicketOwnership, UserId};

/// A ticket as shown in the list, with creator and assignee names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketListItem {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
    pub status: String,
    pub created_by: UserId,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub created_by_name: String,
    /// `None` when unassigned.
    pub assigned_to_name: Option<String>,
}

impl TicketListItem {
    /// The columns that decide who may see this ticket.
    #[must_use]
    pub const fn ownership(&self) -> TicketOwnership {
        TicketOwnership {
            created_by: self.created_by,
            assigned_to: self.assigned_to,
        }
    }
}
