//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;
use helpdesk_core::{Flash, Principal};
use tower_sessions::Session;

use super::FlashPage;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::services::SessionManager;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub principal: Option<Principal>,
    pub flashes: Vec<Flash>,
}

impl FlashPage for DashboardTemplate {
    fn flashes_mut(&mut self) -> &mut Vec<Flash> {
        &mut self.flashes
    }
}

/// GET /dashboard
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn show(
    RequireAuth(principal): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let page = DashboardTemplate {
        principal: Some(principal),
        flashes: Vec::new(),
    };
    super::render(&manager, page).await
}
