//! User account model.

use helpdesk_core::{Email, Principal, Role, RoleError, UserId};

/// A row of the `users` table, minus the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Role exactly as stored. Not constrained by the schema.
    pub role: String,
}

impl User {
    /// Parse the stored role.
    ///
    /// # Errors
    ///
    /// Returns `RoleError` if the stored value is not a known role.
    pub fn role(&self) -> Result<Role, RoleError> {
        self.role.parse()
    }

    /// Snapshot this user as a session principal.
    ///
    /// # Errors
    ///
    /// Returns `RoleError` if the stored role is unknown.
    pub fn to_principal(&self) -> Result<Principal, RoleError> {
        Ok(Principal::new(self.id, self.name.clone(), self.role()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            id: UserId::new(7),
            name: "Dana".to_string(),
            email: Email::parse("dana@example.com").unwrap(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_principal_snapshot() {
        let principal = user("AGENT").to_principal().unwrap();
        assert_eq!(principal.id, UserId::new(7));
        assert_eq!(principal.name, "Dana");
        assert_eq!(principal.role, Role::Agent);
    }

    #[test]
    fn test_unknown_role_has_no_principal() {
        assert!(user("SUPERVISOR").to_principal().is_err());
        assert!(user("admin").to_principal().is_err());
    }
}
