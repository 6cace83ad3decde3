//! Database operations for the helpdesk `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts with an argon2 password hash and a role string
//! - `tickets` - Support tickets, newest first
//! - `tower_sessions.session` - Server-side session records
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p helpdesk-cli -- migrate
//! ```

pub mod tickets;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

pub use tickets::TicketRepository;
pub use users::UserRepository;

use crate::config::DatabaseConfig;

/// `PostgreSQL` error code for `unique_violation`.
pub(crate) const UNIQUE_VIOLATION: &str = "23505";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Build connection options for the configured database.
///
/// Every connection carries a server-side `statement_timeout`, so a stuck
/// query fails the request instead of holding a pooled connection.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if the connection string is invalid.
pub fn connect_options(
    database: &DatabaseConfig,
    statement_timeout: Duration,
) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match database {
        DatabaseConfig::Url(url) => PgConnectOptions::from_str(url.expose_secret())?,
        DatabaseConfig::Parts {
            host,
            port,
            user,
            password,
            name,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .username(user)
            .password(password.expose_secret())
            .database(name),
    };

    let timeout_ms = statement_timeout.as_millis().to_string();
    Ok(options.options([("statement_timeout", timeout_ms.as_str())]))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the options are invalid or the connection cannot
/// be established.
pub async fn create_pool(
    database: &DatabaseConfig,
    statement_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options(database, statement_timeout)?)
        .await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
