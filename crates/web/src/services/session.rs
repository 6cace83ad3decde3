//! Session Manager: binds a principal to a client session.
//!
//! The principal is a snapshot of the `users` row taken at login and is
//! trusted until logout or expiry. Flash messages ride in the same session
//! and are consumed by the next rendered page.

use helpdesk_core::{Flash, Principal, RoleError};
use thiserror::Error;
use tower_sessions::Session;

use crate::models::{User, session_keys};

/// Errors raised by the Session Manager.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user's stored role is not a known role; no session is created.
    #[error("cannot establish session: {0}")]
    UnknownRole(#[from] RoleError),

    /// The session store failed.
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

/// Session Manager over a request's [`Session`].
pub struct SessionManager<'a> {
    session: &'a Session,
}

impl<'a> SessionManager<'a> {
    /// Wrap a request session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Authenticate this client as `user`.
    ///
    /// The session id is rotated first so a pre-login id cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownRole` if the stored role does not parse;
    /// the session is left untouched in that case.
    pub async fn establish(&self, user: &User) -> Result<Principal, SessionError> {
        let principal = user.to_principal()?;

        self.session.cycle_id().await?;
        self.session
            .insert(session_keys::PRINCIPAL, &principal)
            .await?;

        Ok(principal)
    }

    /// The authenticated principal, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the session cannot be loaded.
    pub async fn current(&self) -> Result<Option<Principal>, SessionError> {
        Ok(self.session.get(session_keys::PRINCIPAL).await?)
    }

    /// Drop all session state. Clearing an empty session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the record cannot be deleted.
    pub async fn teardown(&self) -> Result<(), SessionError> {
        self.session.flush().await?;
        Ok(())
    }

    /// Queue a message for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the session cannot be written.
    pub async fn push_flash(&self, flash: Flash) -> Result<(), SessionError> {
        let mut flashes: Vec<Flash> = self
            .session
            .get(session_keys::FLASHES)
            .await?
            .unwrap_or_default();
        flashes.push(flash);
        self.session.insert(session_keys::FLASHES, flashes).await?;
        Ok(())
    }

    /// Remove and return all queued messages.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the session cannot be written.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>, SessionError> {
        Ok(self
            .session
            .remove(session_keys::FLASHES)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use helpdesk_core::{Email, FlashLevel, Role, UserId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn user(role: &str) -> User {
        User {
            id: UserId::new(3),
            name: "Sam".to_string(),
            email: Email::parse("sam@example.com").unwrap(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_establish_then_current() {
        let session = session();
        let manager = SessionManager::new(&session);

        assert_eq!(manager.current().await.unwrap(), None);

        let principal = manager.establish(&user("ADMIN")).await.unwrap();
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(manager.current().await.unwrap(), Some(principal));
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let session = session();
        let manager = SessionManager::new(&session);

        let result = manager.establish(&user("ROOT")).await;
        assert!(matches!(result, Err(SessionError::UnknownRole(_))));
        assert_eq!(manager.current().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_teardown_is_idempotent() {
        let session = session();
        let manager = SessionManager::new(&session);

        manager.teardown().await.unwrap();
        manager.establish(&user("USER")).await.unwrap();
        manager.teardown().await.unwrap();
        manager.teardown().await.unwrap();
        assert_eq!(manager.current().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flashes_are_consumed_once() {
        let session = session();
        let manager = SessionManager::new(&session);

        manager
            .push_flash(Flash::new(FlashLevel::Info, "first"))
            .await
            .unwrap();
        manager
            .push_flash(Flash::new(FlashLevel::Success, "second"))
            .await
            .unwrap();

        let flashes = manager.take_flashes().await.unwrap();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[1].level, FlashLevel::Success);
        assert!(manager.take_flashes().await.unwrap().is_empty());
    }
}
