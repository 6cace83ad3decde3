//! User roles.
//!
//! Roles are stored in `users.role` as the upper-case strings `ADMIN`,
//! `AGENT` and `USER`. The column is plain text, so a row can hold a value
//! that is none of these; parsing is strict and callers decide what an
//! unknown value means.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored role string is not a known [`Role`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0:?}")]
pub struct RoleError(pub String);

/// Role of a helpdesk user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Sees every ticket.
    Admin,
    /// Works the queue: sees tickets assigned to them and unassigned ones.
    Agent,
    /// Sees only the tickets they created.
    User,
}

impl Role {
    /// All roles, most privileged first.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Agent, Self::User];

    /// The value stored in `users.role`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Agent => "AGENT",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "AGENT" => Ok(Self::Agent),
            "USER" => Ok(Self::User),
            other => Err(RoleError(other.to_owned())),
        }
    }
}
