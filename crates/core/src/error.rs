//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (validation, malformed
/// identifiers, unrecognized roles). Session and policy crates layer their
/// own error types on top of this.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. empty subject id).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A role value outside the closed role enumeration.
    ///
    /// Unrecognized roles never satisfy a role check; constructing one is
    /// refused here rather than tolerated downstream.
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
