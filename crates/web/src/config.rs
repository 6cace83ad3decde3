//! Helpdesk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `HELPDESK_BASE_URL` - Public URL of the application (`https://` enables Secure cookies)
//! - `HELPDESK_SESSION_SECRET` - Cookie signing secret (min 64 chars, high entropy)
//! - Database, either:
//!   - `HELPDESK_DATABASE_URL` (fallback `DATABASE_URL`) - `PostgreSQL` connection string, or
//!   - `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` (and optional `DB_PORT`, default 5432)
//!
//! ## Optional
//! - `HELPDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `HELPDESK_PORT` - Listen port (default: 3000)
//! - `HELPDESK_DB_STATEMENT_TIMEOUT_SECS` - Per-statement timeout (default: 5)
//! - `HELPDESK_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Cookie signing keys must be at least 64 bytes.
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 5;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where the database lives.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    /// A full connection string.
    Url(SecretString),
    /// Discrete connection parameters.
    Parts {
        host: String,
        port: u16,
        user: String,
        password: SecretString,
        name: String,
    },
}

/// Helpdesk application configuration.
#[derive(Debug, Clone)]
pub struct HelpdeskConfig {
    /// Database location and credentials
    pub database: DatabaseConfig,
    /// Upper bound on a single SQL statement
    pub statement_timeout: Duration,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl HelpdeskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`HelpdeskConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database = env.database()?;
        let statement_timeout = Duration::from_secs(env.parse_or(
            "HELPDESK_DB_STATEMENT_TIMEOUT_SECS",
            DEFAULT_STATEMENT_TIMEOUT_SECS,
        )?);
        let host = env.parse_or("HELPDESK_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("HELPDESK_PORT", 3000_u16)?;
        let base_url = env.required("HELPDESK_BASE_URL")?;

        let session_secret = env.required("HELPDESK_SESSION_SECRET")?;
        validate_secret_strength(&session_secret, "HELPDESK_SESSION_SECRET")?;
        let session_secret = SecretString::from(session_secret);
        validate_session_secret(&session_secret, "HELPDESK_SESSION_SECRET")?;

        Ok(Self {
            database,
            statement_timeout,
            host,
            port,
            base_url,
            session_secret,
            log_json: env.optional("HELPDESK_LOG_JSON").is_some(),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the Secure attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl DatabaseConfig {
    /// Load only the database location, for tools that do not serve HTTP.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if neither a connection string nor the `DB_*`
    /// variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Env(|key: &str| std::env::var(key).ok()).database()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Connection string first (`HELPDESK_DATABASE_URL`, then the generic
    /// `DATABASE_URL`), otherwise the discrete `DB_*` variables.
    fn database(&self) -> Result<DatabaseConfig, ConfigError> {
        if let Some(url) = self
            .optional("HELPDESK_DATABASE_URL")
            .or_else(|| self.optional("DATABASE_URL"))
        {
            return Ok(DatabaseConfig::Url(SecretString::from(url)));
        }

        Ok(DatabaseConfig::Parts {
            host: self.required("DB_HOST")?,
            port: self.parse_or("DB_PORT", 5432_u16)?,
            user: self.required("DB_USER")?,
            password: SecretString::from(self.required("DB_PASSWORD")?),
            name: self.required("DB_NAME")?,
        })
    }
}

/// Validate that a session secret is long enough to be a signing key.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
