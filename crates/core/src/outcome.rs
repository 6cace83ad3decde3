//! Result of a handler-level operation, independent of the web transport.
//!
//! Login, logout and ticket creation each produce an [`Outcome`]: whether it
//! succeeded, an optional message for the user, and what to do next. The web
//! layer turns a flash into session state and the next action into a
//! redirect or a rendered page.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    /// Operation completed.
    Success,
    /// Neutral notice.
    Info,
    /// Input was rejected.
    Warning,
    /// Operation failed.
    Danger,
}

impl FlashLevel {
    /// CSS class suffix used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub level: FlashLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Flash {
    /// Create a flash message.
    #[must_use]
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Named entry points of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Index,
    /// `/dashboard`
    Dashboard,
    /// `/login`
    Login,
    /// `/logout`
    Logout,
    /// `/tickets`
    Tickets,
    /// `/tickets/new`
    NewTicket,
}

impl Route {
    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Index => "/",
            Self::Dashboard => "/dashboard",
            Self::Login => "/login",
            Self::Logout => "/logout",
            Self::Tickets => "/tickets",
            Self::NewTicket => "/tickets/new",
        }
    }
}

/// Whether the operation achieved what the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The operation took effect.
    Success,
    /// Nothing changed.
    Failure,
}

/// What the transport should do after the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction<V> {
    /// Send the client to another route.
    Redirect(Route),
    /// Render a view in this response.
    Render(V),
}

/// Result of a handler-level operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<V> {
    /// Success or failure.
    pub kind: OutcomeKind,
    /// Message for the user, if any.
    pub flash: Option<Flash>,
    /// Redirect or render.
    pub next: NextAction<V>,
}

impl<V> Outcome<V> {
    /// A successful operation that redirects with a message.
    #[must_use]
    pub fn success(flash: Flash, to: Route) -> Self {
        Self {
            kind: OutcomeKind::Success,
            flash: Some(flash),
            next: NextAction::Redirect(to),
        }
    }

    /// A failed operation that redirects with a message.
    #[must_use]
    pub fn failure_redirect(flash: Flash, to: Route) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            flash: Some(flash),
            next: NextAction::Redirect(to),
        }
    }

    /// A failed operation that re-renders a view with a message.
    #[must_use]
    pub fn failure_render(flash: Flash, view: V) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            flash: Some(flash),
            next: NextAction::Render(view),
        }
    }

    /// Whether the operation took effect.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(Route::NewTicket.path(), "/tickets/new");
        assert_eq!(Route::Logout.path(), "/logout");
    }

    #[test]
    fn test_constructors() {
        let ok: Outcome<()> = Outcome::success(Flash::new(FlashLevel::Success, "done"), Route::Tickets);
        assert!(ok.is_success());
        assert_eq!(ok.next, NextAction::Redirect(Route::Tickets));

        let bad = Outcome::failure_render(Flash::new(FlashLevel::Danger, "nope"), "form");
        assert!(!bad.is_success());
        assert_eq!(bad.next, NextAction::Render("form"));
        assert_eq!(bad.flash.map(|f| f.level), Some(FlashLevel::Danger));
    }
}
