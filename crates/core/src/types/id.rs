//! Newtype IDs for type-safe entity references.
//!
//! Users and tickets are both keyed by `SERIAL` columns, so both ids wrap an
//! `i32`. Keeping them as distinct types stops a ticket id from being bound
//! where a user id is expected (e.g. in the visibility predicate).

/// Defines an `i32`-backed id newtype.
///
/// With the `postgres` feature the type is also a transparent `sqlx::Type`,
/// so it can be bound to parameterized queries and decoded from rows directly.
///
/// ```rust
/// # use helpdesk_core::define_id;
/// define_id!(
///     /// Identifier of a comment.
///     CommentId
/// );
///
/// let id = CommentId::new(7);
/// assert_eq!(id.as_i32(), 7);
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database id.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw database id.
            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `users`.
    UserId
);
define_id!(
    /// Identifier of a row in `tickets`.
    TicketId
);
