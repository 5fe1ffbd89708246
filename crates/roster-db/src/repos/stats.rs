//! Per-date attendance statistics.
//!
//! Records are classified against the student's enrollment on the same
//! activity: `active` counts as enrolled, `waiting` as waitlist, no
//! enrollment at all as a walk-in. Any other enrollment status is not counted.

use chrono::{Datelike, NaiveDate};

use roster_core::enums::{AttendanceStatus, DayOfWeek, EnrollmentStatus};
use roster_core::responses::{ActivityAttendanceStats, AttendanceBreakdown};

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_opt_string, parse_enum};
use crate::repos::activity::{ACTIVITY_COLS, row_to_activity};
use crate::service::RosterService;

/// Fold one attendance record into the breakdown.
fn tally(
    breakdown: &mut AttendanceBreakdown,
    record: AttendanceStatus,
    enrollment: Option<EnrollmentStatus>,
) {
    let slot = match (enrollment, record) {
        (None, AttendanceStatus::Scheduled) => return,
        (None, _) => &mut breakdown.walkin_count,
        (Some(EnrollmentStatus::Active), AttendanceStatus::Present) => {
            &mut breakdown.enrolled_present
        }
        (Some(EnrollmentStatus::Active), AttendanceStatus::UnexpectedAbsence) => {
            &mut breakdown.enrolled_unexpected_absent
        }
        (Some(EnrollmentStatus::Active), AttendanceStatus::ExpectedAbsence) => {
            &mut breakdown.enrolled_expected_absent
        }
        (Some(EnrollmentStatus::Waiting), AttendanceStatus::Present) => {
            &mut breakdown.waitlist_present
        }
        (Some(EnrollmentStatus::Waiting), AttendanceStatus::UnexpectedAbsence) => {
            &mut breakdown.waitlist_unexpected_absent
        }
        (Some(EnrollmentStatus::Waiting), AttendanceStatus::ExpectedAbsence) => {
            &mut breakdown.waitlist_expected_absent
        }
        _ => return,
    };
    *slot += 1;
}

impl RosterService {
    /// Statistics for every activity meeting on `date`: its day of week
    /// matches and its session spans the date.
    pub async fn attendance_stats(
        &self,
        date: NaiveDate,
        organization_id: Option<i64>,
    ) -> Result<Vec<ActivityAttendanceStats>, DatabaseError> {
        let day = DayOfWeek::from_weekday(date.weekday());
        let date_str = date_param(date);

        let mut params: Vec<libsql::Value> = vec![date_str.clone().into(), day.as_str().into()];
        let org_clause = match organization_id {
            Some(org) => {
                params.push(org.into());
                "AND s.organization_id = ?3"
            }
            None => "",
        };

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ACTIVITY_COLS}, l.name, s.name, o.id, o.name,
                            (SELECT COUNT(*) FROM enrollments e
                             WHERE e.activity_id = a.id AND e.status = 'active'),
                            (SELECT COUNT(*) FROM enrollments e
                             WHERE e.activity_id = a.id AND e.status = 'waiting'),
                            m.id, c.id, c.reason
                     FROM activities a
                     JOIN sessions s ON s.id = a.session_id
                     JOIN organizations o ON o.id = s.organization_id
                     LEFT JOIN locations l ON l.id = a.location_id
                     LEFT JOIN meetings m ON m.activity_id = a.id AND m.date = ?1
                     LEFT JOIN cancellations c ON c.activity_id = a.id AND c.date = ?1
                     WHERE a.day_of_week = ?2
                       AND s.start_date <= ?1 AND s.end_date >= ?1
                       {org_clause}
                     ORDER BY a.time, a.id"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut stats = Vec::new();
        let mut meetings = Vec::new();
        while let Some(row) = rows.next().await? {
            let meeting_id = row.get::<Option<i64>>(14)?;
            meetings.push(meeting_id);
            stats.push(ActivityAttendanceStats {
                activity: row_to_activity(&row)?,
                location_name: get_opt_string(&row, 8)?,
                session_name: row.get(9)?,
                organization_id: row.get(10)?,
                organization_name: row.get(11)?,
                enrolled_count: u32::try_from(row.get::<i64>(12)?).unwrap_or(u32::MAX),
                waitlist_count: u32::try_from(row.get::<i64>(13)?).unwrap_or(u32::MAX),
                has_meeting: meeting_id.is_some(),
                is_cancelled: row.get::<Option<i64>>(15)?.is_some(),
                cancellation_reason: get_opt_string(&row, 16)?,
                attendance: AttendanceBreakdown::default(),
            });
        }

        for (entry, meeting_id) in stats.iter_mut().zip(meetings) {
            if let Some(meeting_id) = meeting_id {
                entry.attendance = self
                    .attendance_breakdown(meeting_id, entry.activity.id)
                    .await?;
            }
        }
        Ok(stats)
    }

    async fn attendance_breakdown(
        &self,
        meeting_id: i64,
        activity_id: i64,
    ) -> Result<AttendanceBreakdown, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT r.status, e.status FROM attendance_records r
                 LEFT JOIN enrollments e
                   ON e.student_id = r.student_id AND e.activity_id = ?2
                 WHERE r.meeting_id = ?1",
                [meeting_id, activity_id],
            )
            .await?;

        let mut breakdown = AttendanceBreakdown::default();
        while let Some(row) = rows.next().await? {
            let record: AttendanceStatus = parse_enum(&row.get::<String>(0)?)?;
            let enrollment = match row.get::<Option<String>>(1)? {
                Some(raw) => Some(parse_enum(&raw)?),
                None => None,
            };
            tally(&mut breakdown, record, enrollment);
        }
        Ok(breakdown)
    }
}
