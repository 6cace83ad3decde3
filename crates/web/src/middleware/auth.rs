//! Auth Gate: extractors for requiring authentication in route handlers.
//!
//! A handler that takes [`RequireAuth`] is never invoked for an
//! unauthenticated request; the extractor rejects with a redirect first.
//! A session store that cannot be read ends the request with a 500, never
//! with a redirect.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use helpdesk_core::{Principal, Route};
use tower_sessions::Session;

use crate::error::AppError;
use crate::services::{SessionError, SessionManager};

/// Extractor that requires an authenticated principal.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", principal.name)
/// }
/// ```
pub struct RequireAuth(pub Principal);

/// Error returned when the gate cannot admit the request.
#[derive(Debug)]
pub enum AuthRejection {
    /// No principal in the session.
    RedirectToLogin,
    /// The session layer is not installed on this route.
    MissingSessionLayer,
    /// The session record could not be loaded.
    SessionStore(SessionError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(Route::Login.path()).into_response(),
            Self::MissingSessionLayer => {
                tracing::error!("Session layer missing for guarded route");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::SessionStore(e) => AppError::Session(e).into_response(),
        }
    }
}

/// The gate decision: pass the principal through, or redirect to login.
///
/// # Errors
///
/// Returns `AuthRejection::RedirectToLogin` when there is no principal.
pub fn gate(principal: Option<Principal>) -> Result<Principal, AuthRejection> {
    principal.ok_or(AuthRejection::RedirectToLogin)
}

async fn session_principal(session: &Session) -> Result<Option<Principal>, AuthRejection> {
    SessionManager::new(session)
        .current()
        .await
        .map_err(AuthRejection::SessionStore)
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSessionLayer)?;

        gate(session_principal(session).await?).map(Self)
    }
}

/// Extractor that optionally gets the current principal.
///
/// Unlike `RequireAuth`, a missing principal is not a rejection. A failing
/// session store still is.
pub struct OptionalAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = match parts.extensions.get::<Session>() {
            Some(session) => session_principal(session).await?,
            None => None,
        };

        Ok(Self(principal))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;
    use helpdesk_core::{Role, UserId};

    use super::*;

    #[test]
    fn test_gate_passes_principal_through() {
        let principal = Principal::new(UserId::new(1), "Ada".to_string(), Role::Agent);
        assert_eq!(gate(Some(principal.clone())).unwrap(), principal);
    }

    #[test]
    fn test_gate_redirects_without_principal() {
        assert!(matches!(gate(None), Err(AuthRejection::RedirectToLogin)));
    }

    #[test]
    fn test_rejection_redirects_to_login() {
        let response = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn test_store_failure_is_server_error() {
        let error = tower_sessions::session::Error::Store(
            tower_sessions::session_store::Error::Backend("connection refused".to_string()),
        );
        let response = AuthRejection::SessionStore(SessionError::Store(error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
    }
}
