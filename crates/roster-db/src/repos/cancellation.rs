//! Cancellation repository and effective occurrences.
//!
//! A cancellation says an activity does not meet on a date. It is independent
//! of meetings: a date may be cancelled with or without a meeting row.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use roster_core::entities::Cancellation;
use roster_core::responses::OccurrenceSchedule;
use roster_core::schedule;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_date, get_opt_string};
use crate::service::RosterService;

const SELECT_COLS: &str = "c.id, c.activity_id, c.date, c.reason";

fn row_to_cancellation(row: &libsql::Row) -> Result<Cancellation, DatabaseError> {
    Ok(Cancellation {
        id: row.get(0)?,
        activity_id: row.get(1)?,
        date: get_date(row, 2)?,
        reason: get_opt_string(row, 3)?,
    })
}

/// Which cancellations [`RosterService::list_cancellations`] returns.
#[derive(Debug, Clone, Default)]
pub struct CancellationFilter {
    /// Inclusive lower bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end_date: Option<NaiveDate>,
    pub organization_id: Option<i64>,
    pub activity_id: Option<i64>,
}

impl RosterService {
    /// Cancel `activity_id` on `date`. A second cancellation of the same
    /// date is a `Conflict`.
    pub async fn create_cancellation(
        &self,
        activity_id: i64,
        date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<Cancellation, DatabaseError> {
        self.require_identity()?;
        self.get_activity(activity_id).await?;
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO cancellations (activity_id, date, reason) VALUES (?1, ?2, ?3)",
            libsql::params![activity_id, date_param(date), reason],
        )
        .await
        .map_err(|e| {
            DatabaseError::from_unique(e, || {
                format!("activity {activity_id} is already cancelled on {date}")
            })
        })?;

        let id = conn.last_insert_rowid();
        tracing::info!(activity_id, %date, cancellation_id = id, "class cancelled");
        Ok(Cancellation {
            id,
            activity_id,
            date,
            reason: reason.map(String::from),
        })
    }

    pub async fn get_cancellation(&self, id: i64) -> Result<Cancellation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM cancellations c WHERE c.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("cancellation", id))?;
        row_to_cancellation(&row)
    }

    /// The cancellation of `activity_id` on `date`, if any.
    pub async fn find_cancellation(
        &self,
        activity_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Cancellation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM cancellations c WHERE c.activity_id = ?1 AND c.date = ?2"
                ),
                libsql::params![activity_id, date_param(date)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_cancellation(&row)?)),
            None => Ok(None),
        }
    }

    /// Un-cancel.
    pub async fn delete_cancellation(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM cancellations WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("cancellation", id));
        }
        tracing::info!(cancellation_id = id, "cancellation removed");
        Ok(())
    }

    /// Cancellations ordered by date, then activity.
    pub async fn list_cancellations(
        &self,
        filter: &CancellationFilter,
    ) -> Result<Vec<Cancellation>, DatabaseError> {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date)
            && start > end
        {
            return Err(DatabaseError::Validation(format!(
                "start_date {start} is after end_date {end}"
            )));
        }

        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(start) = filter.start_date {
            params.push(date_param(start).into());
            clauses.push(format!("c.date >= ?{}", params.len()));
        }
        if let Some(end) = filter.end_date {
            params.push(date_param(end).into());
            clauses.push(format!("c.date <= ?{}", params.len()));
        }
        if let Some(org) = filter.organization_id {
            params.push(org.into());
            clauses.push(format!("s.organization_id = ?{}", params.len()));
        }
        if let Some(activity_id) = filter.activity_id {
            params.push(activity_id.into());
            clauses.push(format!("c.activity_id = ?{}", params.len()));
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM cancellations c
                     JOIN activities a ON a.id = c.activity_id
                     JOIN sessions s ON s.id = a.session_id
                     {where_sql}
                     ORDER BY c.date, c.activity_id"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut cancellations = Vec::new();
        while let Some(row) = rows.next().await? {
            cancellations.push(row_to_cancellation(&row)?);
        }
        Ok(cancellations)
    }

    /// Every cancellation on a single date, optionally scoped to an organization.
    pub async fn cancellations_for_date(
        &self,
        date: NaiveDate,
        organization_id: Option<i64>,
    ) -> Result<Vec<Cancellation>, DatabaseError> {
        self.list_cancellations(&CancellationFilter {
            start_date: Some(date),
            end_date: Some(date),
            organization_id,
            activity_id: None,
        })
        .await
    }

    pub async fn cancelled_dates(
        &self,
        activity_id: i64,
    ) -> Result<BTreeSet<NaiveDate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT date FROM cancellations WHERE activity_id = ?1",
                [activity_id],
            )
            .await?;

        let mut dates = BTreeSet::new();
        while let Some(row) = rows.next().await? {
            dates.insert(get_date(&row, 0)?);
        }
        Ok(dates)
    }

    /// Weekly dates of the activity across its session, minus cancellations.
    pub async fn effective_occurrences(
        &self,
        activity_id: i64,
    ) -> Result<OccurrenceSchedule, DatabaseError> {
        let activity = self.get_activity(activity_id).await?;
        let session = self.get_session(activity.session_id).await?;
        let cancelled = self.cancelled_dates(activity_id).await?;

        Ok(OccurrenceSchedule {
            activity_id,
            dates: schedule::effective_occurrences(&session, activity.day_of_week, &cancelled),
            cancelled: cancelled.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, date, test_service,
    };
    use pretty_assertions::assert_eq;
    use roster_core::enums::{ActivityType, DayOfWeek};

    async fn setup() -> (RosterService, i64, i64) {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let activity =
            create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
                .await;
        (svc, org.id, activity.id)
    }

    #[tokio::test]
    async fn duplicate_cancellation_conflicts() {
        let (svc, _, activity) = setup().await;
        svc.create_cancellation(activity, date("2025-09-15"), Some("Holiday"))
            .await
            .unwrap();
        let result = svc
            .create_cancellation(activity, date("2025-09-15"), None)
            .await;
        assert!(matches!(result, Err(DatabaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn blank_reason_is_stored_as_none() {
        let (svc, _, activity) = setup().await;
        let created = svc
            .create_cancellation(activity, date("2025-09-15"), Some("  "))
            .await
            .unwrap();
        assert_eq!(created.reason, None);
        assert_eq!(svc.get_cancellation(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_uncancels() {
        let (svc, _, activity) = setup().await;
        let created = svc
            .create_cancellation(activity, date("2025-09-15"), None)
            .await
            .unwrap();
        svc.delete_cancellation(created.id).await.unwrap();

        assert!(
            svc.find_cancellation(activity, date("2025-09-15"))
                .await
                .unwrap()
                .is_none()
        );
        let again = svc.delete_cancellation(created.id).await;
        assert!(matches!(again, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_filters_by_range_and_organization() {
        let (svc, org, activity) = setup().await;
        let other_org = create_test_org(&svc, "Other").await;
        let other_session = create_fall_session(&svc, other_org.id).await;
        let other = create_test_activity(
            &svc,
            other_session.id,
            ActivityType::Pound,
            DayOfWeek::Monday,
            "09:00",
        )
        .await;

        for day in ["2025-09-08", "2025-09-15", "2025-09-22"] {
            svc.create_cancellation(activity, date(day), None)
                .await
                .unwrap();
        }
        svc.create_cancellation(other.id, date("2025-09-15"), None)
            .await
            .unwrap();

        let ranged = svc
            .list_cancellations(&CancellationFilter {
                start_date: Some(date("2025-09-10")),
                end_date: Some(date("2025-09-30")),
                organization_id: Some(org),
                ..CancellationFilter::default()
            })
            .await
            .unwrap();
        let dates: Vec<_> = ranged.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date("2025-09-15"), date("2025-09-22")]);

        let on_day = svc
            .cancellations_for_date(date("2025-09-15"), None)
            .await
            .unwrap();
        assert_eq!(on_day.len(), 2);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let (svc, _, _) = setup().await;
        let result = svc
            .list_cancellations(&CancellationFilter {
                start_date: Some(date("2025-10-01")),
                end_date: Some(date("2025-09-01")),
                ..CancellationFilter::default()
            })
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn occurrences_exclude_cancelled_dates() {
        let (svc, _, activity) = setup().await;
        svc.create_cancellation(activity, date("2025-09-15"), Some("Holiday"))
            .await
            .unwrap();

        let schedule = svc.effective_occurrences(activity).await.unwrap();
        assert!(!schedule.dates.contains(&date("2025-09-15")));
        assert!(schedule.dates.contains(&date("2025-09-08")));
        assert_eq!(schedule.dates.len(), 15);
        assert_eq!(schedule.cancelled, vec![date("2025-09-15")]);
    }
}
