//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// Who is making the request.
///
/// A principal is a snapshot of the `users` row taken at login. It is not
/// re-read on later requests, so a role change in the store only takes effect
/// after the user logs in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The user's database id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Role at login time.
    pub role: Role,
}

impl Principal {
    /// Create a principal.
    #[must_use]
    pub const fn new(id: UserId, name: String, role: Role) -> Self {
        Self { id, name, role }
    }
}
