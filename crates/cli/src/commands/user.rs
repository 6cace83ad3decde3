//! User management commands.

use helpdesk_core::{Email, Role};
use helpdesk_web::db::UserRepository;
use helpdesk_web::services::AuthService;

use super::{CommandError, connect};

/// Create a user with an argon2id-hashed password.
///
/// # Errors
///
/// Returns `CommandError::Auth` for invalid input or a duplicate email.
pub async fn create(
    email: &str,
    name: &str,
    role: Role,
    password: &str,
) -> Result<(), CommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .create_user(name, email, password, role)
        .await?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User created"
    );
    Ok(())
}

/// Change a user's role. Active sessions keep the old role until the user
/// logs in again.
///
/// # Errors
///
/// Returns `CommandError::UserNotFound` if no user has this email.
pub async fn set_role(email: &str, role: Role) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    let user = users
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    users.set_role(user.id, role.as_str()).await?;

    tracing::info!(
        user_id = %user.id,
        from = %user.role,
        to = %role,
        "Role changed; takes effect at next login"
    );
    Ok(())
}
