//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only malformed *input* surfaces here. Business-rule failures on a form are
/// reported as data (an error report), never as `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input outside the accepted vocabulary (unknown field, PO type,
    /// currency) or unreadable catalog data.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was blank or failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The same identifier appeared twice where it must be unique.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = DomainError::validation("unknown field `foo`");
        assert_eq!(err.to_string(), "validation failed: unknown field `foo`");
        assert_eq!(
            DomainError::conflict("talent T6 listed twice").to_string(),
            "conflict: talent T6 listed twice"
        );
    }
}
