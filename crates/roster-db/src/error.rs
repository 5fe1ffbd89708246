//! Database error types for roster-db.

use roster_core::errors::CoreError;
use roster_core::export::ExportError;
use thiserror::Error;

/// Errors from service operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Malformed input: bad date, out-of-range count, overlapping sets.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation on a natural key.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A state-mutating operation was called without a caller identity.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// The spreadsheet export collaborator failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Map a libSQL uniqueness failure to `Conflict`, leaving other errors as-is.
    pub(crate) fn from_unique(err: libsql::Error, conflict: impl FnOnce() -> String) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict(conflict())
        } else {
            Self::LibSql(err)
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

/// Whether `err` is a UNIQUE constraint failure.
#[must_use]
pub fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
