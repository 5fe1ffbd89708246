//! Activity repository.
//!
//! An activity's `closed` flag is independently settable, but it can never be
//! open while its session is closed.

use chrono::NaiveTime;

use roster_core::entities::Activity;
use roster_core::enums::{ActivityType, DayOfWeek};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_time, parse_enum, time_param};
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::activity::ActivityUpdate;

/// Columns of `activities a`, in `row_to_activity` order.
pub(crate) const ACTIVITY_COLS: &str =
    "a.id, a.session_id, a.type, a.day_of_week, a.time, a.location_id, a.max_capacity, a.closed";

/// Monday-first ordering of `a.day_of_week`.
pub(crate) const DAY_ORDER: &str = "CASE a.day_of_week \
     WHEN 'monday' THEN 0 WHEN 'tuesday' THEN 1 WHEN 'wednesday' THEN 2 \
     WHEN 'thursday' THEN 3 WHEN 'friday' THEN 4 WHEN 'saturday' THEN 5 \
     ELSE 6 END";

pub(crate) fn row_to_activity(row: &libsql::Row) -> Result<Activity, DatabaseError> {
    Ok(Activity {
        id: row.get(0)?,
        session_id: row.get(1)?,
        activity_type: parse_enum(&row.get::<String>(2)?)?,
        day_of_week: parse_enum(&row.get::<String>(3)?)?,
        time: get_time(row, 4)?,
        location_id: row.get::<Option<i64>>(5)?,
        max_capacity: row.get::<Option<i64>>(6)?,
        closed: get_bool(row, 7)?,
    })
}

/// Fields of an activity to create.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub session_id: i64,
    pub activity_type: ActivityType,
    pub day_of_week: DayOfWeek,
    pub time: NaiveTime,
    pub location_id: Option<i64>,
    pub max_capacity: Option<i64>,
}

/// Which activities [`RosterService::list_activities`] returns.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub session_id: Option<i64>,
    pub organization_id: Option<i64>,
    /// Also return activities of closed sessions.
    pub include_inactive: bool,
}

impl RosterService {
    /// Create an activity. Created closed when its session is closed.
    pub async fn create_activity(&self, new: NewActivity) -> Result<Activity, DatabaseError> {
        self.require_identity()?;
        let session = self.get_session(new.session_id).await?;
        if let Some(location_id) = new.location_id {
            self.get_location(location_id).await?;
        }
        if let Some(capacity) = new.max_capacity
            && capacity < 0
        {
            return Err(DatabaseError::Validation(
                "max_capacity must not be negative".into(),
            ));
        }

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO activities (session_id, type, day_of_week, time, location_id, max_capacity, closed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                new.session_id,
                new.activity_type.as_str(),
                new.day_of_week.as_str(),
                time_param(new.time),
                new.location_id,
                new.max_capacity,
                i64::from(session.closed)
            ],
        )
        .await?;

        Ok(Activity {
            id: conn.last_insert_rowid(),
            session_id: new.session_id,
            activity_type: new.activity_type,
            day_of_week: new.day_of_week,
            time: new.time,
            location_id: new.location_id,
            max_capacity: new.max_capacity,
            closed: session.closed,
        })
    }

    pub async fn get_activity(&self, id: i64) -> Result<Activity, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ACTIVITY_COLS} FROM activities a WHERE a.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("activity", id))?;
        row_to_activity(&row)
    }

    /// Activities ordered by day of week (Monday first), then time.
    pub async fn list_activities(
        &self,
        filter: &ActivityFilter,
    ) -> Result<Vec<Activity>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(session_id) = filter.session_id {
            params.push(session_id.into());
            clauses.push(format!("a.session_id = ?{}", params.len()));
        }
        if let Some(org) = filter.organization_id {
            params.push(org.into());
            clauses.push(format!("s.organization_id = ?{}", params.len()));
        }
        if !filter.include_inactive {
            clauses.push("s.closed = 0".to_string());
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
                    "SELECT {ACTIVITY_COLS} FROM activities a
                     JOIN sessions s ON s.id = a.session_id
                     {where_sql}
                     ORDER BY {DAY_ORDER}, a.time, a.id"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut activities = Vec::new();
        while let Some(row) = rows.next().await? {
            activities.push(row_to_activity(&row)?);
        }
        Ok(activities)
    }

    pub async fn update_activity(
        &self,
        id: i64,
        update: ActivityUpdate,
    ) -> Result<Activity, DatabaseError> {
        self.require_identity()?;
        let current = self.get_activity(id).await?;
        if update.closed == Some(false) && self.get_session(current.session_id).await?.closed {
            return Err(DatabaseError::Validation(format!(
                "activity {id} cannot be reopened while session {} is closed",
                current.session_id
            )));
        }
        if let Some(Some(location_id)) = update.location_id {
            self.get_location(location_id).await?;
        }

        let mut sets = SetClauses::default();
        if let Some(activity_type) = update.activity_type {
            sets.push("type", activity_type.as_str());
        }
        if let Some(day_of_week) = update.day_of_week {
            sets.push("day_of_week", day_of_week.as_str());
        }
        if let Some(time) = update.time {
            sets.push("time", time_param(time));
        }
        if let Some(location_id) = update.location_id {
            sets.push_opt("location_id", location_id);
        }
        if let Some(max_capacity) = update.max_capacity {
            sets.push_opt("max_capacity", max_capacity);
        }
        if let Some(closed) = update.closed {
            sets.push("closed", i64::from(closed));
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("activities", id);
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_activity(id).await
    }

    /// Hard delete; meetings, enrollments and cancellations go with it.
    pub async fn delete_activity(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM activities WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("activity", id));
        }
        Ok(())
    }
}
