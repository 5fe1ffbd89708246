//! Weekly attendance and residency reports.

use chrono::NaiveDate;

use roster_core::enums::{ActivityType, AttendanceStatus, DayOfWeek};
use roster_core::responses::{Absentee, ResidencyReport, ResidencyRow, WeeklyMeetingRow, WeeklyReport};
use roster_core::schedule::week_window;

use crate::error::DatabaseError;
use crate::helpers::{date_param, get_date, get_opt_string, get_time, parse_enum};
use crate::repos::activity::DAY_ORDER;
use crate::service::RosterService;

const REPORT_TIME_FORMAT: &str = "%H:%M";

fn count(raw: i64) -> u32 {
    u32::try_from(raw).unwrap_or(u32::MAX)
}

impl RosterService {
    /// Meetings of the organization's open activities in the Sunday-to-Saturday
    /// week starting at `week_start`, ordered by date then time. Meetings on
    /// cancelled dates are left out even when the meeting row already exists.
    pub async fn weekly_report(
        &self,
        organization_id: i64,
        week_start: NaiveDate,
    ) -> Result<WeeklyReport, DatabaseError> {
        let organization = self.get_organization(organization_id).await?;
        let (week_start, week_end) = week_window(week_start)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT m.id, m.date, a.day_of_week, a.type, a.time, l.name
                 FROM meetings m
                 JOIN activities a ON a.id = m.activity_id
                 JOIN sessions s ON s.id = a.session_id
                 LEFT JOIN locations l ON l.id = a.location_id
                 LEFT JOIN cancellations c ON c.activity_id = a.id AND c.date = m.date
                 WHERE s.organization_id = ?1 AND a.closed = 0 AND c.id IS NULL
                   AND m.date >= ?2 AND m.date <= ?3
                 ORDER BY m.date, a.time, m.id",
                libsql::params![organization_id, date_param(week_start), date_param(week_end)],
            )
            .await?;

        let mut meetings = Vec::new();
        while let Some(row) = rows.next().await? {
            let activity_type: ActivityType = parse_enum(&row.get::<String>(3)?)?;
            meetings.push(WeeklyMeetingRow {
                meeting_id: row.get(0)?,
                date: get_date(&row, 1)?,
                day_of_week: parse_enum(&row.get::<String>(2)?)?,
                class_type: activity_type.label().to_string(),
                time: get_time(&row, 4)?.format(REPORT_TIME_FORMAT).to_string(),
                location: get_opt_string(&row, 5)?,
                present_count: 0,
                unexpected_absences: Vec::new(),
                expected_absences: Vec::new(),
            });
        }

        for meeting in &mut meetings {
            self.fill_weekly_attendance(meeting).await?;
        }

        tracing::debug!(organization_id, %week_start, meetings = meetings.len(), "weekly report built");
        Ok(WeeklyReport {
            organization_name: organization.name,
            week_start,
            week_end,
            meetings,
        })
    }

    async fn fill_weekly_attendance(
        &self,
        meeting: &mut WeeklyMeetingRow,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT r.status, st.id, st.first_name, st.last_name
                 FROM attendance_records r
                 JOIN students st ON st.id = r.student_id
                 WHERE r.meeting_id = ?1
                 ORDER BY st.last_name, st.first_name, st.id",
                [meeting.meeting_id],
            )
            .await?;

        while let Some(row) = rows.next().await? {
            let status: AttendanceStatus = parse_enum(&row.get::<String>(0)?)?;
            let first_name: String = row.get(2)?;
            let last_name: String = row.get(3)?;
            let absentee = Absentee {
                id: row.get(1)?,
                name: format!("{last_name}, {first_name}"),
                first_name,
                last_name,
            };
            match status {
                AttendanceStatus::Present => meeting.present_count += 1,
                AttendanceStatus::UnexpectedAbsence => meeting.unexpected_absences.push(absentee),
                AttendanceStatus::ExpectedAbsence => meeting.expected_absences.push(absentee),
                AttendanceStatus::Scheduled => {}
            }
        }
        Ok(())
    }

    /// Present counts per activity of the session, summed across all of its
    /// meetings and split by the student residency flag. Meetings on cancelled
    /// dates do not count.
    ///
    /// The session must belong to `organization_id`; otherwise `NotFound`.
    pub async fn residency_report(
        &self,
        organization_id: i64,
        session_id: i64,
    ) -> Result<ResidencyReport, DatabaseError> {
        let organization = self.get_organization(organization_id).await?;
        let session = self.get_session(session_id).await?;
        if session.organization_id != organization_id {
            return Err(DatabaseError::NotFound {
                entity: "session".into(),
                id: format!(
                    "{session_id} (does not belong to organization '{}')",
                    organization.name
                ),
            });
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT a.id, a.day_of_week, a.type, a.time, l.name,
                            COALESCE(SUM(CASE WHEN st.rochester = 1 THEN 1 ELSE 0 END), 0),
                            COALESCE(SUM(CASE WHEN st.rochester = 0 THEN 1 ELSE 0 END), 0)
                     FROM activities a
                     LEFT JOIN locations l ON l.id = a.location_id
                     LEFT JOIN meetings m ON m.activity_id = a.id
                       AND NOT EXISTS (
                         SELECT 1 FROM cancellations c
                         WHERE c.activity_id = a.id AND c.date = m.date
                       )
                     LEFT JOIN attendance_records r
                       ON r.meeting_id = m.id AND r.status = 'present'
                     LEFT JOIN students st ON st.id = r.student_id
                     WHERE a.session_id = ?1
                     GROUP BY a.id
                     ORDER BY {DAY_ORDER}, a.time, a.id"
                ),
                [session_id],
            )
            .await?;

        let mut activities = Vec::new();
        while let Some(row) = rows.next().await? {
            let day_of_week: DayOfWeek = parse_enum(&row.get::<String>(1)?)?;
            let activity_type: ActivityType = parse_enum(&row.get::<String>(2)?)?;
            activities.push(ResidencyRow {
                activity_id: row.get(0)?,
                day_of_week,
                class_type: activity_type.label().to_string(),
                time: get_time(&row, 3)?.format(REPORT_TIME_FORMAT).to_string(),
                location: get_opt_string(&row, 4)?,
                rochester_count: count(row.get(5)?),
                non_rochester_count: count(row.get(6)?),
            });
        }

        Ok(ResidencyReport {
            organization_name: organization.name,
            session_name: session.name,
            activities,
        })
    }
}
