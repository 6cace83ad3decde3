//! Ticket inspection commands.

use helpdesk_core::{Email, TicketId, TicketScope};
use helpdesk_web::db::{RepositoryError, TicketRepository, UserRepository};
use helpdesk_web::models::TicketListItem;

use super::{CommandError, connect};

/// Print the tickets a user would see in the web UI.
///
/// The scope comes straight from the stored role string, so an account with
/// an unrecognised role shows what a `USER` would see.
///
/// # Errors
///
/// Returns `CommandError::UserNotFound` if no user has this email.
pub async fn list(email: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let user = UserRepository::new(&pool)
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    let scope = TicketScope::for_stored_role(user.id, &user.role);
    tracing::info!(user_id = %user.id, role = %user.role, ?scope, "Listing tickets");

    let tickets = TicketRepository::new(&pool).list_visible(scope).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{} ticket(s) visible to {} ({})", tickets.len(), user.name, user.role);
        for ticket in &tickets {
            println!("{}", format_row(ticket));
        }
    }
    Ok(())
}

/// Assign a ticket to the user with `to`, or clear the assignee.
///
/// # Errors
///
/// Returns `CommandError::TicketNotFound` or `CommandError::UserNotFound`.
pub async fn assign(id: i32, to: Option<&str>) -> Result<(), CommandError> {
    let pool = connect().await?;

    let assignee = match to {
        Some(email) => {
            let email = Email::parse(email)?;
            let user = UserRepository::new(&pool)
                .get_by_email(&email)
                .await?
                .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;
            Some(user.id)
        }
        None => None,
    };

    match TicketRepository::new(&pool)
        .assign(TicketId::new(id), assignee)
        .await
    {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => return Err(CommandError::TicketNotFound(id)),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(ticket_id = id, assignee = ?assignee, "Ticket assignment updated");
    Ok(())
}

fn format_row(ticket: &TicketListItem) -> String {
    format!(
        "#{:<5} {} | {:<8} | {:<8} | by {} | {} | {}",
        ticket.id.as_i32(),
        ticket.created_at.format("%Y-%m-%d %H:%M"),
        ticket.status,
        ticket.priority.as_deref().unwrap_or("-"),
        ticket.created_by_name,
        ticket.assigned_to_name.as_deref().unwrap_or("unassigned"),
        ticket.title,
    )
}
