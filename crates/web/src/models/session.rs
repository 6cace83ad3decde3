//! Session-related types.
//!
//! The authenticated [`Principal`](helpdesk_core::Principal) and pending
//! flash messages are the only state kept in a session.

/// Session keys.
pub mod keys {
    /// Key for storing the logged-in principal.
    pub const PRINCIPAL: &str = "principal";

    /// Key for one-shot flash messages awaiting display.
    pub const FLASHES: &str = "flashes";
}
