//! Domain error model.
//!
//! One taxonomy for the whole core. Layer-local errors (authorization,
//! storage, rendering) convert into this at the boundary where they stop
//! being actionable, and the transport adapter maps each variant to a
//! status code exactly once.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No verified identity present. Fatal to the request, never retried.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Identity resolved but the action was denied (guard denial or a
    /// fail-closed scope). Never downgraded to an empty result.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Record absent, or present but outside the caller's tenant scope.
    /// The two cases are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    /// Malformed input; recoverable by the caller. Names the offending field.
    #[error("validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Storage returned a malformed or partial aggregation result. Fatal for
    /// the request: partial totals are never returned.
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}

impl DomainError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
