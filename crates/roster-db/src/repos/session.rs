//! Session repository: CRUD plus the lifecycle rules.
//!
//! Closing a session closes every activity under it in the same transaction.
//! The cascade only runs in that direction: reopening a session leaves its
//! activities closed.

use chrono::NaiveDate;

use roster_core::entities::{Activity, Session};
use roster_core::responses::{ActivityCopyResponse, SessionCloseResponse, SessionDetail};

use crate::error::DatabaseError;
use crate::helpers::{date_param, finish_tx, get_bool, get_date, time_param};
use crate::repos::activity::{ACTIVITY_COLS, ActivityFilter};
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::session::SessionUpdate;

pub(crate) const SESSION_COLS: &str =
    "id, organization_id, name, start_date, end_date, closed";

pub(crate) fn row_to_session(row: &libsql::Row) -> Result<Session, DatabaseError> {
    Ok(Session {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        name: row.get(2)?,
        start_date: get_date(row, 3)?,
        end_date: get_date(row, 4)?,
        closed: get_bool(row, 5)?,
    })
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DatabaseError> {
    if start > end {
        return Err(DatabaseError::Validation(format!(
            "start_date {start} is after end_date {end}"
        )));
    }
    Ok(())
}

impl RosterService {
    pub async fn create_session(
        &self,
        organization_id: i64,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Session, DatabaseError> {
        self.require_identity()?;
        check_range(start_date, end_date)?;
        self.get_organization(organization_id).await?;

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO sessions (organization_id, name, start_date, end_date) VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                organization_id,
                name,
                date_param(start_date),
                date_param(end_date)
            ],
        )
        .await?;

        Ok(Session {
            id: conn.last_insert_rowid(),
            organization_id,
            name: name.to_string(),
            start_date,
            end_date,
            closed: false,
        })
    }

    pub async fn get_session(&self, id: i64) -> Result<Session, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SESSION_COLS} FROM sessions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("session", id))?;
        row_to_session(&row)
    }

    /// Sessions ordered by start date, newest first.
    pub async fn list_sessions(
        &self,
        organization_id: Option<i64>,
        include_closed: bool,
    ) -> Result<Vec<Session>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(org) = organization_id {
            params.push(org.into());
            clauses.push(format!("organization_id = ?{}", params.len()));
        }
        if !include_closed {
            clauses.push("closed = 0".to_string());
        }
        let filter = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SESSION_COLS} FROM sessions {filter} ORDER BY start_date DESC, id"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_session(&row)?);
        }
        Ok(sessions)
    }

    /// Partial update. Setting `closed = true` cascades to every activity of
    /// the session inside the same transaction.
    pub async fn update_session(
        &self,
        id: i64,
        update: SessionUpdate,
    ) -> Result<Session, DatabaseError> {
        self.require_identity()?;
        let current = self.get_session(id).await?;
        check_range(
            update.start_date.unwrap_or(current.start_date),
            update.end_date.unwrap_or(current.end_date),
        )?;

        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(start_date) = update.start_date {
            sets.push("start_date", date_param(start_date));
        }
        if let Some(end_date) = update.end_date {
            sets.push("end_date", date_param(end_date));
        }
        if let Some(closed) = update.closed {
            sets.push("closed", i64::from(closed));
        }
        if sets.is_empty() {
            return Ok(current);
        }
        let cascade = update.closed == Some(true);

        let (sql, params) = sets.into_update("sessions", id);
        let tx = self.db().conn().transaction().await?;
        let result = async {
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            if cascade {
                close_activities(&tx, id).await
            } else {
                Ok(0)
            }
        }
        .await;
        let closed_activities = finish_tx(tx, result).await?;

        if cascade {
            tracing::info!(session_id = id, closed_activities, "session closed via update");
        }
        self.get_session(id).await
    }

    /// Close a session and all of its activities. Idempotent.
    pub async fn close_session(&self, id: i64) -> Result<SessionCloseResponse, DatabaseError> {
        self.require_identity()?;
        self.get_session(id).await?;

        let tx = self.db().conn().transaction().await?;
        let result = async {
            tx.execute("UPDATE sessions SET closed = 1 WHERE id = ?1", [id])
                .await?;
            close_activities(&tx, id).await
        }
        .await;
        let activities_closed = finish_tx(tx, result).await?;

        tracing::info!(session_id = id, activities_closed, "session closed");
        Ok(SessionCloseResponse {
            session: self.get_session(id).await?,
            activities_closed,
        })
    }

    /// Hard delete; activities, meetings, enrollments and cancellations go with it.
    pub async fn delete_session(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("session", id));
        }
        Ok(())
    }

    pub async fn session_detail(&self, id: i64) -> Result<SessionDetail, DatabaseError> {
        let session = self.get_session(id).await?;
        let organization = self.get_organization(session.organization_id).await?;
        let activities = self
            .list_activities(&ActivityFilter {
                session_id: Some(id),
                include_inactive: true,
                ..ActivityFilter::default()
            })
            .await?;
        Ok(SessionDetail {
            session,
            organization,
            activities,
        })
    }

    /// Duplicate one activity of `source_session_id` into `target_session_id`.
    ///
    /// The copy is open unless the target session is closed, in which case
    /// it is created closed so a closed session never holds open activities.
    pub async fn copy_activity(
        &self,
        source_session_id: i64,
        activity_id: i64,
        target_session_id: i64,
    ) -> Result<Activity, DatabaseError> {
        self.require_identity()?;
        let source = self.get_activity(activity_id).await?;
        if source.session_id != source_session_id {
            return Err(DatabaseError::NotFound {
                entity: "activity".into(),
                id: format!("{activity_id} in session {source_session_id}"),
            });
        }
        let target = self.get_session(target_session_id).await?;

        let copy = insert_copy(self.db().conn(), &source, &target).await?;
        tracing::info!(
            source_activity = activity_id,
            new_activity = copy.id,
            target_session_id,
            "activity copied"
        );
        Ok(copy)
    }

    /// Duplicate every activity of `source_session_id` into
    /// `target_session_id`. Repeated calls create repeated copies.
    pub async fn copy_all_activities(
        &self,
        source_session_id: i64,
        target_session_id: i64,
    ) -> Result<ActivityCopyResponse, DatabaseError> {
        self.require_identity()?;
        self.get_session(source_session_id).await?;
        let target = self.get_session(target_session_id).await?;
        let sources = self
            .list_activities(&ActivityFilter {
                session_id: Some(source_session_id),
                include_inactive: true,
                ..ActivityFilter::default()
            })
            .await?;

        let tx = self.db().conn().transaction().await?;
        let result = async {
            let mut copied = Vec::with_capacity(sources.len());
            for source in &sources {
                copied.push(insert_copy(&tx, source, &target).await?);
            }
            Ok::<_, DatabaseError>(copied)
        }
        .await;
        let copied = finish_tx(tx, result).await?;

        tracing::info!(
            source_session_id,
            target_session_id,
            copied = copied.len(),
            "activities copied"
        );
        Ok(ActivityCopyResponse {
            target_session_id,
            copied,
        })
    }
}

async fn close_activities(conn: &libsql::Connection, session_id: i64) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute(
            "UPDATE activities SET closed = 1 WHERE session_id = ?1 AND closed = 0",
            [session_id],
        )
        .await?)
}

async fn insert_copy(
    conn: &libsql::Connection,
    source: &Activity,
    target: &Session,
) -> Result<Activity, DatabaseError> {
    conn.execute(
        "INSERT INTO activities (session_id, type, day_of_week, time, location_id, max_capacity, closed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            target.id,
            source.activity_type.as_str(),
            source.day_of_week.as_str(),
            time_param(source.time),
            source.location_id,
            source.max_capacity,
            i64::from(target.closed)
        ],
    )
    .await?;
    let id = conn.last_insert_rowid();

    let mut rows = conn
        .query(
            &format!("SELECT {ACTIVITY_COLS} FROM activities a WHERE a.id = ?1"),
            [id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("activity", id))?;
    crate::repos::activity::row_to_activity(&row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, date, test_service,
    };
    use crate::updates::activity::ActivityUpdateBuilder;
    use crate::updates::session::SessionUpdateBuilder;
    use roster_core::enums::{ActivityType, DayOfWeek};

    async fn all_activities(svc: &RosterService, session_id: i64) -> Vec<Activity> {
        svc.list_activities(&ActivityFilter {
            session_id: Some(session_id),
            include_inactive: true,
            ..ActivityFilter::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn inverted_dates_are_rejected() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let result = svc
            .create_session(org.id, "Bad", date("2025-12-01"), date("2025-09-01"))
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn close_session_cascades_to_activities() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        for day in [DayOfWeek::Monday, DayOfWeek::Thursday] {
            create_test_activity(&svc, session.id, ActivityType::Zumba, day, "18:00").await;
        }

        let closed = svc.close_session(session.id).await.unwrap();
        assert!(closed.session.closed);
        assert_eq!(closed.activities_closed, 2);
        assert!(all_activities(&svc, session.id).await.iter().all(|a| a.closed));

        let again = svc.close_session(session.id).await.unwrap();
        assert_eq!(again.activities_closed, 0);
        assert!(again.session.closed);
    }

    #[tokio::test]
    async fn update_with_closed_cascades() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        create_test_activity(&svc, session.id, ActivityType::Pound, DayOfWeek::Friday, "09:30")
            .await;

        let updated = svc
            .update_session(
                session.id,
                SessionUpdateBuilder::new().name("Fall 2025 (done)").closed(true).build(),
            )
            .await
            .unwrap();
        assert!(updated.closed);
        assert_eq!(updated.name, "Fall 2025 (done)");
        assert!(all_activities(&svc, session.id).await.iter().all(|a| a.closed));
    }

    #[tokio::test]
    async fn reopening_session_leaves_activities_closed() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
            .await;
        svc.close_session(session.id).await.unwrap();

        svc.update_session(session.id, SessionUpdateBuilder::new().closed(false).build())
            .await
            .unwrap();
        assert!(all_activities(&svc, session.id).await.iter().all(|a| a.closed));
    }

    #[tokio::test]
    async fn update_rejects_end_before_existing_start() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let result = svc
            .update_session(
                session.id,
                SessionUpdateBuilder::new().end_date(date("2025-08-01")).build(),
            )
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert_eq!(svc.get_session(session.id).await.unwrap(), session);
    }

    #[tokio::test]
    async fn copy_activity_creates_open_copy() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let fall = create_fall_session(&svc, org.id).await;
        let winter = svc
            .create_session(org.id, "Winter 2026", date("2026-01-05"), date("2026-03-30"))
            .await
            .unwrap();
        let gym = svc.create_location(org.id, "Gym", None).await.unwrap();
        let source =
            create_test_activity(&svc, fall.id, ActivityType::ZumbaGold, DayOfWeek::Tuesday, "10:00")
                .await;
        svc.update_activity(
            source.id,
            ActivityUpdateBuilder::new()
                .location_id(Some(gym.id))
                .max_capacity(Some(25))
                .closed(true)
                .build(),
        )
        .await
        .unwrap();

        let copy = svc.copy_activity(fall.id, source.id, winter.id).await.unwrap();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.session_id, winter.id);
        assert_eq!(copy.activity_type, ActivityType::ZumbaGold);
        assert_eq!(copy.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(copy.location_id, Some(gym.id));
        assert_eq!(copy.max_capacity, Some(25));
        assert!(!copy.closed);
    }

    #[tokio::test]
    async fn copies_into_closed_session_are_closed() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let fall = create_fall_session(&svc, org.id).await;
        let archive = svc
            .create_session(org.id, "Summer 2025", date("2025-06-02"), date("2025-08-15"))
            .await
            .unwrap();
        svc.close_session(archive.id).await.unwrap();
        let source =
            create_test_activity(&svc, fall.id, ActivityType::Pound, DayOfWeek::Thursday, "17:30")
                .await;
        create_test_activity(&svc, fall.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00").await;

        let copy = svc.copy_activity(fall.id, source.id, archive.id).await.unwrap();
        assert_eq!(copy.session_id, archive.id);
        assert!(copy.closed);
        assert!(!svc.get_activity(source.id).await.unwrap().closed);

        let all = svc.copy_all_activities(fall.id, archive.id).await.unwrap();
        assert_eq!(all.copied.len(), 2);
        assert!(all.copied.iter().all(|activity| activity.closed));
    }

    #[tokio::test]
    async fn copy_activity_from_wrong_session_is_not_found() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let fall = create_fall_session(&svc, org.id).await;
        let other = create_fall_session(&svc, org.id).await;
        let activity =
            create_test_activity(&svc, fall.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
                .await;

        let result = svc.copy_activity(other.id, activity.id, other.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn copy_all_repeats_without_dedup() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let fall = create_fall_session(&svc, org.id).await;
        let winter = svc
            .create_session(org.id, "Winter 2026", date("2026-01-05"), date("2026-03-30"))
            .await
            .unwrap();
        for day in [DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday] {
            create_test_activity(&svc, fall.id, ActivityType::Zumba, day, "18:00").await;
        }

        let first = svc.copy_all_activities(fall.id, winter.id).await.unwrap();
        assert_eq!(first.copied.len(), 3);
        let second = svc.copy_all_activities(fall.id, winter.id).await.unwrap();
        assert_eq!(second.copied.len(), 3);
        assert_eq!(all_activities(&svc, winter.id).await.len(), 6);
    }

    #[tokio::test]
    async fn session_detail_includes_closed_activities() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
            .await;
        svc.close_session(session.id).await.unwrap();

        let detail = svc.session_detail(session.id).await.unwrap();
        assert_eq!(detail.organization.id, org.id);
        assert_eq!(detail.activities.len(), 1);
    }
}
