//! # roster-db
//!
//! libSQL storage and service operations for Roster.
//!
//! Holds all relational state: organizations, locations, contacts, sessions,
//! activities, meetings, students, enrollments, attendance records and
//! cancellations. The consistency rules that tie them together (closure
//! cascade, enrollment reconciliation, meeting seeding, cancellation overlay)
//! live in the repo modules as `impl RosterService` blocks.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection.
pub struct RosterDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RosterDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:"
            && let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Migration(format!("create {}: {e}", parent.display()))
            })?;
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let roster_db = Self { db, conn };
        roster_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(roster_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> RosterDb {
        RosterDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "organizations",
            "locations",
            "contacts",
            "sessions",
            "activities",
            "meetings",
            "students",
            "enrollments",
            "attendance_records",
            "cancellations",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO sessions (organization_id, name, start_date, end_date) VALUES (999, 'x', '2025-01-01', '2025-02-01')",
                (),
            )
            .await;
        assert!(result.is_err(), "orphan session should be rejected");
    }

    #[tokio::test]
    async fn meeting_natural_key_is_unique() {
        let db = test_db().await;
        let conn = db.conn();
        conn.execute_batch(
            "INSERT INTO organizations (name) VALUES ('Org');
             INSERT INTO sessions (organization_id, name, start_date, end_date) VALUES (1, 'S', '2025-09-01', '2025-12-15');
             INSERT INTO activities (session_id, type, day_of_week, time) VALUES (1, 'zumba', 'monday', '18:00:00');
             INSERT INTO meetings (activity_id, date) VALUES (1, '2025-09-08');",
        )
        .await
        .unwrap();

        let err = conn
            .execute(
                "INSERT INTO meetings (activity_id, date) VALUES (1, '2025-09-08')",
                (),
            )
            .await
            .unwrap_err();
        assert!(error::is_unique_violation(&err));
    }

    #[tokio::test]
    async fn deleting_location_nulls_activity_reference() {
        let db = test_db().await;
        let conn = db.conn();
        conn.execute_batch(
            "INSERT INTO organizations (name) VALUES ('Org');
             INSERT INTO locations (organization_id, name) VALUES (1, 'Gym');
             INSERT INTO sessions (organization_id, name, start_date, end_date) VALUES (1, 'S', '2025-09-01', '2025-12-15');
             INSERT INTO activities (session_id, type, day_of_week, time, location_id) VALUES (1, 'pound', 'friday', '09:30:00', 1);
             DELETE FROM locations WHERE id = 1;",
        )
        .await
        .unwrap();

        let mut rows = conn
            .query("SELECT location_id FROM activities WHERE id = 1", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<Option<i64>>(0).unwrap(), None);
    }
}
