//! Cross-cutting error types for Roster.
//!
//! Storage-specific errors (`DatabaseError`) and export errors live in their
//! own crates. This type covers failures of the pure rules in this crate.

use thiserror::Error;

/// Errors raised by the pure domain rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (format, range, missing field).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
