//! Ticket repository for database operations.

use chrono::{DateTime, Utc};
use helpdesk_core::{NewTicket, TicketId, TicketScope, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::RepositoryError;
use crate::models::TicketListItem;

/// Initial status of every new ticket.
pub const DEFAULT_STATUS: &str = "OPEN";

const LIST_SELECT: &str = r"
    SELECT t.id, t.title, t.description, t.priority, t.status,
           t.created_by, t.assigned_to, t.created_at,
           u.name AS created_by_name, a.name AS assigned_to_name
    FROM tickets t
    JOIN users u ON t.created_by = u.id
    LEFT JOIN users a ON t.assigned_to = a.id
";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct TicketListRow {
    id: i32,
    title: String,
    description: String,
    priority: Option<String>,
    status: String,
    created_by: i32,
    assigned_to: Option<i32>,
    created_at: DateTime<Utc>,
    created_by_name: String,
    assigned_to_name: Option<String>,
}

impl From<TicketListRow> for TicketListItem {
    fn from(row: TicketListRow) -> Self {
        Self {
            id: TicketId::new(row.id),
            title: row.title,
            description: row.description,
            priority: row.priority,
            status: row.status,
            created_by: UserId::new(row.created_by),
            assigned_to: row.assigned_to.map(UserId::new),
            created_at: row.created_at,
            created_by_name: row.created_by_name,
            assigned_to_name: row.assigned_to_name,
        }
    }
}

/// Build the list query for a scope.
///
/// The principal id is always a bound parameter. Ties on `created_at` fall
/// back to the id so the order is total.
fn visible_tickets_query(scope: TicketScope) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(LIST_SELECT);

    match scope {
        TicketScope::All => {}
        TicketScope::AssignedOrUnassigned(agent) => {
            qb.push(" WHERE (t.assigned_to = ")
                .push_bind(agent)
                .push(" OR t.assigned_to IS NULL)");
        }
        TicketScope::CreatedBy(user) => {
            qb.push(" WHERE t.created_by = ").push_bind(user);
        }
    }

    qb.push(" ORDER BY t.created_at DESC, t.id DESC");
    qb
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for ticket database operations.
pub struct TicketRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TicketRepository<'a> {
    /// Create a new ticket repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the tickets a scope may see, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_visible(
        &self,
        scope: TicketScope,
    ) -> Result<Vec<TicketListItem>, RepositoryError> {
        let mut qb = visible_tickets_query(scope);
        let rows = qb
            .build_query_as::<TicketListRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a ticket created by `created_by`, unassigned and `OPEN`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (for example
    /// when the creator no longer exists). Nothing is written in that case.
    pub async fn create(
        &self,
        ticket: &NewTicket,
        created_by: UserId,
    ) -> Result<TicketId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO tickets (title, description, priority, status, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.priority.as_deref())
        .bind(DEFAULT_STATUS)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TicketId::new(id))
    }

    /// Assign a ticket to a user, or clear the assignee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ticket does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn assign(
        &self,
        id: TicketId,
        assignee: Option<UserId>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE tickets SET assigned_to = $1 WHERE id = $2")
            .bind(assignee)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_query_has_no_filter() {
        let qb = visible_tickets_query(TicketScope::All);
        let sql = qb.sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.trim_end().ends_with("ORDER BY t.created_at DESC, t.id DESC"));
    }

    #[test]
    fn test_agent_query_binds_principal() {
        let qb = visible_tickets_query(TicketScope::AssignedOrUnassigned(UserId::new(4242)));
        let sql = qb.sql();
        assert!(sql.contains("WHERE (t.assigned_to = $1 OR t.assigned_to IS NULL)"));
        assert!(!sql.contains("4242"));
    }

    #[test]
    fn test_user_query_binds_principal() {
        let qb = visible_tickets_query(TicketScope::CreatedBy(UserId::new(4242)));
        let sql = qb.sql();
        assert!(sql.contains("WHERE t.created_by = $1"));
        assert!(!sql.contains("4242"));
    }

    #[test]
    fn test_list_resolves_names() {
        assert!(LIST_SELECT.contains("LEFT JOIN users a ON t.assigned_to = a.id"));
        assert!(LIST_SELECT.contains("JOIN users u ON t.created_by = u.id"));
    }
}
