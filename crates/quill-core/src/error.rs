//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for a validation failure on one field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation(vec![FieldViolation::new(field, message)])
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound("Resource"),
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

impl From<crate::ports::AuthError> for DomainError {
    fn from(err: crate::ports::AuthError) -> Self {
        use crate::ports::AuthError;

        match err {
            AuthError::InvalidCredentials => {
                DomainError::Unauthenticated("Invalid credentials".to_string())
            }
            AuthError::TokenExpired => DomainError::Unauthenticated("Token expired".to_string()),
            AuthError::InvalidToken(_) | AuthError::MissingAuth => DomainError::Unauthenticated(
                "Not authorized to access this route".to_string(),
            ),
            AuthError::InsufficientPermissions => {
                DomainError::Forbidden("Insufficient permissions".to_string())
            }
            AuthError::HashingError(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = DomainError::Validation(vec![
            FieldViolation::new("title", "is required"),
            FieldViolation::new("category", "must be a valid identifier"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: title: is required, category: must be a valid identifier"
        );
    }

    #[test]
    fn test_constraint_becomes_conflict() {
        let err: DomainError = RepoError::Constraint("slug taken".to_string()).into();
        assert!(matches!(err, DomainError::Conflict(msg) if msg == "slug taken"));
    }
}
