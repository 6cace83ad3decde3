//! HTTP route handlers.
//!
//! | Method/Path          | Auth | Handler                     |
//! |----------------------|------|-----------------------------|
//! | GET /                | no   | redirect by session state   |
//! | GET /dashboard       | yes  | [`dashboard::show`]         |
//! | GET,POST /login      | no   | [`auth::login_page`], [`auth::login`] |
//! | GET /logout          | yes  | [`auth::logout`]            |
//! | GET /tickets         | yes  | [`tickets::index`]          |
//! | GET,POST /tickets/new| yes  | [`tickets::new_form`], [`tickets::create`] |
//! | GET /health          | no   | [`health::health`]          |
//! | GET /health/ready    | no   | [`health::ready`]           |

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod tickets;

use std::convert::Infallible;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use helpdesk_core::{Flash, NextAction, Outcome, Route};

use crate::error::AppError;
use crate::middleware::OptionalAuth;
use crate::services::SessionManager;
use crate::state::AppState;

/// A rendered page that shows flash messages.
pub trait FlashPage {
    /// Messages to show on this page.
    fn flashes_mut(&mut self) -> &mut Vec<Flash>;
}

impl FlashPage for Infallible {
    fn flashes_mut(&mut self) -> &mut Vec<Flash> {
        match *self {}
    }
}

/// Turn an [`Outcome`] into an HTTP response.
///
/// A redirect queues the flash in the session for the next page; a render
/// shows it immediately alongside anything already queued.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn respond<V>(
    manager: &SessionManager<'_>,
    outcome: Outcome<V>,
) -> Result<Response, AppError>
where
    V: FlashPage + IntoResponse,
{
    match outcome.next {
        NextAction::Redirect(route) => {
            if let Some(flash) = outcome.flash {
                manager.push_flash(flash).await?;
            }
            Ok(Redirect::to(route.path()).into_response())
        }
        NextAction::Render(mut page) => {
            let queued = manager.take_flashes().await?;
            let flashes = page.flashes_mut();
            flashes.extend(queued);
            flashes.extend(outcome.flash);
            Ok(page.into_response())
        }
    }
}

/// Render a page with any queued flash messages.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn render<V>(manager: &SessionManager<'_>, mut page: V) -> Result<Response, AppError>
where
    V: FlashPage + IntoResponse,
{
    page.flashes_mut().extend(manager.take_flashes().await?);
    Ok(page.into_response())
}

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard::show))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/tickets", get(tickets::index))
        .route("/tickets/new", get(tickets::new_form).post(tickets::create))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}

/// GET /
async fn index(OptionalAuth(principal): OptionalAuth) -> Redirect {
    let to = if principal.is_some() {
        Route::Dashboard
    } else {
        Route::Login
    };
    Redirect::to(to.path())
}
