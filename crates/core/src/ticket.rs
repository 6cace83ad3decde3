//! Ticket input validation.
//!
//! Validation happens before any database work: a rejected submission never
//! reaches the insert.

use serde::{Deserialize, Serialize};

/// Reasons a ticket submission is rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketValidationError {
    /// Title is missing or blank.
    #[error("Title and description are required.")]
    MissingTitle,
    /// Description is missing or blank.
    #[error("Title and description are required.")]
    MissingDescription,
}

/// A validated ticket submission.
///
/// The creator is not part of the submission; it is always the principal
/// making the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    /// Short summary, never blank.
    pub title: String,
    /// Body, never blank.
    pub description: String,
    /// Free-form priority label. Blank input is stored as `None`.
    pub priority: Option<String>,
}

impl NewTicket {
    /// Validate raw form input.
    ///
    /// Title and description are trimmed and must be non-empty. Priority is
    /// accepted as given (after trimming); there is no fixed set of values.
    ///
    /// # Errors
    ///
    /// Returns [`TicketValidationError`] if the title or description is blank.
    /// Both variants display the same message.
    pub fn parse(
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, TicketValidationError> {
        let title = non_blank(title).ok_or(TicketValidationError::MissingTitle)?;
        let description = non_blank(description).ok_or(TicketValidationError::MissingDescription)?;

        Ok(Self {
            title,
            description,
            priority: non_blank(priority),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let ticket = NewTicket::parse(Some(" VPN down "), Some("Cannot connect"), Some("HIGH"))
            .unwrap();
        assert_eq!(ticket.title, "VPN down");
        assert_eq!(ticket.description, "Cannot connect");
        assert_eq!(ticket.priority.as_deref(), Some("HIGH"));
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(
            NewTicket::parse(None, Some("body"), None),
            Err(TicketValidationError::MissingTitle)
        );
        assert_eq!(
            NewTicket::parse(Some("   "), Some("body"), None),
            Err(TicketValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_missing_description() {
        assert_eq!(
            NewTicket::parse(Some("title"), Some(""), None),
            Err(TicketValidationError::MissingDescription)
        );
    }

    #[test]
    fn test_priority_is_free_form() {
        let ticket = NewTicket::parse(Some("t"), Some("d"), Some("whenever")).unwrap();
        assert_eq!(ticket.priority.as_deref(), Some("whenever"));

        let ticket = NewTicket::parse(Some("t"), Some("d"), Some(" ")).unwrap();
        assert_eq!(ticket.priority, None);
    }

    #[test]
    fn test_user_facing_message() {
        assert_eq!(
            TicketValidationError::MissingTitle.to_string(),
            "Title and description are required."
        );
        assert_eq!(
            TicketValidationError::MissingDescription.to_string(),
            TicketValidationError::MissingTitle.to_string()
        );
    }
}
