//! CLI command implementations.

pub mod migrate;
pub mod tickets;
pub mod user;

use std::time::Duration;

use helpdesk_web::config::{ConfigError, DatabaseConfig};
use helpdesk_web::db::RepositoryError;
use helpdesk_web::services::AuthError;
use sqlx::PgPool;
use thiserror::Error;

/// Statement timeout for CLI sessions. Migrations may run long.
const CLI_STATEMENT_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] helpdesk_core::EmailError),

    #[error("No user with email {0}")]
    UserNotFound(String),

    #[error("No ticket with id {0}")]
    TicketNotFound(i32),
}

/// Connect using the same database settings as the server.
async fn connect() -> Result<PgPool, CommandError> {
    let database = DatabaseConfig::from_env()?;
    tracing::info!("Connecting to database...");
    Ok(helpdesk_web::db::create_pool(&database, CLI_STATEMENT_TIMEOUT).await?)
}
