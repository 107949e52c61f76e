//! Services - business operations composed from the ports.
//!
//! Each service validates invariants that need the store (uniqueness, references,
//! ownership) and calls the derivation rules explicitly before writing.

mod auth;
mod categories;
mod posts;
mod tags;

pub use auth::{AuthService, AuthSession, DetailChanges, Registration};
pub use categories::CategoryService;
pub use posts::{PostDetails, PostService};
pub use tags::TagService;

use crate::domain::{Actor, Role};
use crate::error::DomainError;

/// Role gate shared by the admin-only managers.
pub(crate) fn require_role(actor: &Actor, role: Role) -> Result<(), DomainError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "User role {} is not authorized to access this route",
            actor.role
        )))
    }
}

/// Reject names whose slug would be empty.
pub(crate) fn require_slug(field: &str, slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        Err(DomainError::invalid(
            field,
            "must contain at least one letter or digit",
        ))
    } else {
        Ok(())
    }
}
