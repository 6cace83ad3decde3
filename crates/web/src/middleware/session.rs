//! Session middleware configuration.
//!
//! Cookies carry only the session id, signed with the configured secret.
//! A cookie with a bad signature is ignored and the request is treated as
//! unauthenticated.

use secrecy::ExposeSecret;
use tower_sessions::cookie::{Key, KeyError, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::HelpdeskConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hd_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Derive the cookie signing key from the configured secret.
///
/// # Errors
///
/// Returns `KeyError` if the secret is shorter than 64 bytes.
pub fn session_key(config: &HelpdeskConfig) -> Result<Key, KeyError> {
    Key::try_from(config.session_secret.expose_secret().as_bytes())
}

/// Create the session layer over any session store.
///
/// Production uses the `PostgreSQL` store; tests use the in-memory one.
///
/// # Errors
///
/// Returns `KeyError` if the signing key cannot be derived.
pub fn create_session_layer<S>(
    store: S,
    config: &HelpdeskConfig,
) -> Result<SessionManagerLayer<S, tower_sessions::service::SignedCookie>, KeyError>
where
    S: SessionStore + Clone,
{
    let key = session_key(config)?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
