//! Ticket route handlers: list, creation form, create.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Response,
};
use helpdesk_core::{Flash, Principal};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{FlashPage, render, respond};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::TicketListItem;
use crate::services::{SessionManager, TicketService};
use crate::state::AppState;

/// Ticket row for templates.
#[derive(Debug, Clone)]
pub struct TicketView {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Empty when no priority was given.
    pub priority: String,
    pub status: String,
    pub created_by_name: String,
    /// Empty when unassigned.
    pub assigned_to_name: String,
    pub created_at: String,
}

impl From<TicketListItem> for TicketView {
    fn from(ticket: TicketListItem) -> Self {
        Self {
            id: ticket.id.as_i32(),
            title: ticket.title,
            description: ticket.description,
            priority: ticket.priority.unwrap_or_default(),
            status: ticket.status,
            created_by_name: ticket.created_by_name,
            assigned_to_name: ticket.assigned_to_name.unwrap_or_default(),
            created_at: ticket.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Ticket list template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/list.html")]
pub struct TicketListTemplate {
    pub principal: Option<Principal>,
    pub flashes: Vec<Flash>,
    pub tickets: Vec<TicketView>,
}

impl FlashPage for TicketListTemplate {
    fn flashes_mut(&mut self) -> &mut Vec<Flash> {
        &mut self.flashes
    }
}

/// Ticket creation form template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/new.html")]
pub struct NewTicketTemplate {
    pub principal: Option<Principal>,
    pub flashes: Vec<Flash>,
}

impl FlashPage for NewTicketTemplate {
    fn flashes_mut(&mut self) -> &mut Vec<Flash> {
        &mut self.flashes
    }
}

/// Ticket creation form data. Missing fields are treated as blank.
#[derive(Debug, Default, Deserialize)]
pub struct TicketForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

/// List the tickets visible to the principal.
///
/// GET /tickets
///
/// # Errors
///
/// Returns `AppError` if the query or the session store fails.
#[instrument(skip_all, fields(user_id = %principal.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let tickets = TicketService::new(state.pool())
        .visible_to(&principal)
        .await?
        .into_iter()
        .map(TicketView::from)
        .collect();

    let page = TicketListTemplate {
        principal: Some(principal),
        flashes: Vec::new(),
        tickets,
    };
    render(&manager, page).await
}

/// Render the creation form.
///
/// GET /tickets/new
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn new_form(
    RequireAuth(principal): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let page = NewTicketTemplate {
        principal: Some(principal),
        flashes: Vec::new(),
    };
    render(&manager, page).await
}

/// Create a ticket owned by the principal.
///
/// POST /tickets/new
///
/// # Errors
///
/// Returns `AppError` if the insert or the session store fails.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    session: Session,
    Form(form): Form<TicketForm>,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let outcome = TicketService::new(state.pool())
        .submit(
            &principal,
            form.title.as_deref(),
            form.description.as_deref(),
            form.priority.as_deref(),
        )
        .await?;

    respond(&manager, outcome).await
}
