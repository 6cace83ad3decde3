//! Authentication route handlers: login form, login, logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Response,
};
use helpdesk_core::{Flash, FlashLevel, Outcome, Principal, Route};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use super::{FlashPage, render, respond};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::services::{AuthError, AuthService, SessionError, SessionManager};
use crate::state::AppState;

/// Generic login failure. Never says which part was wrong.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password.";

/// Shown on the login page after logout.
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub principal: Option<Principal>,
    pub flashes: Vec<Flash>,
    /// Email to pre-fill after a failed attempt.
    pub email: String,
}

impl FlashPage for LoginTemplate {
    fn flashes_mut(&mut self) -> &mut Vec<Flash> {
        &mut self.flashes
    }
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Render the login page.
///
/// GET /login
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn login_page(
    OptionalAuth(principal): OptionalAuth,
    session: Session,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let page = LoginTemplate {
        principal,
        flashes: Vec::new(),
        email: String::new(),
    };
    render(&manager, page).await
}

/// Verify credentials and establish a session.
///
/// POST /login
///
/// Unknown email, wrong password and an unusable stored role all produce the
/// same response: the form again, with a generic message.
///
/// # Errors
///
/// Returns `AppError` only for storage or session-store failures.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    let auth = AuthService::new(state.pool());

    let established = match auth.login(&form.email, &form.password).await {
        Ok(user) => match manager.establish(&user).await {
            Ok(principal) => Some(principal),
            Err(SessionError::UnknownRole(e)) => {
                warn!(user_id = %user.id, error = %e, "Login refused: stored role is not recognised");
                None
            }
            Err(e) => return Err(e.into()),
        },
        Err(AuthError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = match established {
        Some(principal) => {
            set_sentry_user(principal.id.as_i32(), &principal.name);
            info!(user_id = %principal.id, role = %principal.role, "User logged in");
            Outcome::success(
                Flash::new(
                    FlashLevel::Success,
                    format!("Welcome, {}!", principal.name),
                ),
                Route::Dashboard,
            )
        }
        None => Outcome::failure_render(
            Flash::new(FlashLevel::Danger, LOGIN_FAILED_MESSAGE),
            LoginTemplate {
                principal: None,
                flashes: Vec::new(),
                email: form.email.trim().to_string(),
            },
        ),
    };

    respond(&manager, outcome).await
}

/// Clear the session and return to the login page.
///
/// GET /logout
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn logout(
    RequireAuth(principal): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let manager = SessionManager::new(&session);
    manager.teardown().await?;
    clear_sentry_user();
    info!(user_id = %principal.id, "User logged out");

    let outcome: Outcome<LoginTemplate> =
        Outcome::success(Flash::new(FlashLevel::Info, LOGGED_OUT_MESSAGE), Route::Login);
    respond(&manager, outcome).await
}
