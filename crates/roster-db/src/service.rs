//! Service layer over the database.
//!
//! `RosterService` wraps `RosterDb` and the caller identity. All repo methods
//! are implemented as `impl RosterService` blocks in [`crate::repos`].

use roster_core::identity::AuthIdentity;

use crate::RosterDb;
use crate::error::DatabaseError;

/// Entry point for every operation.
///
/// Read operations work without an identity; every state-mutating operation
/// calls [`RosterService::require_identity`] first.
pub struct RosterService {
    db: RosterDb,
    identity: Option<AuthIdentity>,
}

impl RosterService {
    /// Create a new service over a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        identity: Option<AuthIdentity>,
    ) -> Result<Self, DatabaseError> {
        let db = RosterDb::open_local(db_path).await?;
        Ok(Self::from_db(db, identity))
    }

    /// Create from an existing `RosterDb`.
    #[must_use]
    pub const fn from_db(db: RosterDb, identity: Option<AuthIdentity>) -> Self {
        Self { db, identity }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RosterDb {
        &self.db
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AuthIdentity> {
        self.identity.as_ref()
    }

    /// Identity of the caller, or `Unauthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unauthenticated` when no identity is attached.
    pub fn require_identity(&self) -> Result<&AuthIdentity, DatabaseError> {
        self.identity.as_ref().ok_or_else(|| {
            DatabaseError::Unauthenticated("this operation modifies data".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{anonymous_service, test_service};

    #[tokio::test]
    async fn identity_is_fixed_at_construction() {
        let svc = test_service().await;
        assert_eq!(
            svc.require_identity().unwrap(),
            &AuthIdentity::new("test-operator")
        );
        assert_eq!(svc.identity().map(|i| i.user_id.as_str()), Some("test-operator"));

        let anonymous = anonymous_service().await;
        assert!(anonymous.identity().is_none());
        assert!(matches!(
            anonymous.require_identity(),
            Err(DatabaseError::Unauthenticated(_))
        ));
    }
}
