//! Meeting and attendance repository.
//!
//! A meeting exists at most once per `(activity, date)`. Creating it seeds a
//! `scheduled` attendance record for every active enrollment of the activity,
//! exactly once. Waitlisted students and walk-ins get records only when
//! attendance is taken.

use chrono::NaiveDate;
use serde::Deserialize;

use roster_core::entities::{AttendanceRecord, Meeting};
use roster_core::enums::{AttendanceStatus, EnrollmentStatus};
use roster_core::responses::{AttendanceEntry, AttendanceUpdateResponse, MeetingDetail, StudentRef};

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{date_param, finish_tx, get_date, get_opt_string, parse_enum};
use crate::repos::student::{STUDENT_COL_COUNT, STUDENT_COLS, row_to_student};
use crate::service::RosterService;

const SELECT_COLS: &str = "id, activity_id, date";

fn row_to_meeting(row: &libsql::Row) -> Result<Meeting, DatabaseError> {
    Ok(Meeting {
        id: row.get(0)?,
        activity_id: row.get(1)?,
        date: get_date(row, 2)?,
    })
}

/// One entry of an attendance batch.
///
/// Every field is optional so a partially filled form can be submitted;
/// entries without a student or a recognized status are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceInput {
    pub student_id: Option<i64>,
    pub status: Option<String>,
    pub note: Option<String>,
}

impl AttendanceInput {
    #[must_use]
    pub fn new(student_id: i64, status: AttendanceStatus) -> Self {
        Self {
            student_id: Some(student_id),
            status: Some(status.as_str().to_string()),
            note: None,
        }
    }

    /// The `(student, status)` pair, when both are present and valid.
    fn resolve(&self) -> Option<(i64, AttendanceStatus)> {
        let student_id = self.student_id?;
        let status = parse_enum(self.status.as_deref()?.trim()).ok()?;
        Some((student_id, status))
    }
}

async fn find_meeting(
    conn: &libsql::Connection,
    activity_id: i64,
    date: &str,
) -> Result<Option<Meeting>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM meetings WHERE activity_id = ?1 AND date = ?2"),
            libsql::params![activity_id, date],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_meeting(&row)?)),
        None => Ok(None),
    }
}

/// Create the meeting and seed it; `None` when another writer got there first.
async fn insert_seeded(
    conn: &libsql::Connection,
    activity_id: i64,
    date: &str,
) -> Result<Option<(i64, u64)>, DatabaseError> {
    match conn
        .execute(
            "INSERT INTO meetings (activity_id, date) VALUES (?1, ?2)",
            libsql::params![activity_id, date],
        )
        .await
    {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let meeting_id = conn.last_insert_rowid();
    let seeded = conn
        .execute(
            "INSERT INTO attendance_records (meeting_id, student_id, status)
             SELECT ?1, student_id, ?2 FROM enrollments
             WHERE activity_id = ?3 AND status = ?4",
            libsql::params![
                meeting_id,
                AttendanceStatus::Scheduled.as_str(),
                activity_id,
                EnrollmentStatus::Active.as_str()
            ],
        )
        .await?;
    Ok(Some((meeting_id, seeded)))
}

impl RosterService {
    /// Return the meeting of `activity_id` on `date`, creating and seeding it
    /// when absent. Calling it again never reseeds.
    pub async fn get_or_create_meeting(
        &self,
        activity_id: i64,
        date: NaiveDate,
    ) -> Result<MeetingDetail, DatabaseError> {
        self.require_identity()?;
        self.get_activity(activity_id).await?;
        let date_str = date_param(date);

        let tx = self.db().conn().transaction().await?;
        let result = async {
            if let Some(existing) = find_meeting(&tx, activity_id, &date_str).await? {
                return Ok((existing, false));
            }
            match insert_seeded(&tx, activity_id, &date_str).await? {
                Some((meeting_id, seeded)) => {
                    tracing::info!(activity_id, meeting_id, seeded, %date, "meeting created");
                    Ok((
                        Meeting {
                            id: meeting_id,
                            activity_id,
                            date,
                        },
                        true,
                    ))
                }
                None => {
                    let existing = find_meeting(&tx, activity_id, &date_str)
                        .await?
                        .ok_or_else(|| DatabaseError::not_found("meeting", &date_str))?;
                    Ok((existing, false))
                }
            }
        }
        .await;
        let (meeting, created) = finish_tx(tx, result).await?;

        self.meeting_detail(meeting, created).await
    }

    pub async fn get_meeting(&self, id: i64) -> Result<Meeting, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM meetings WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("meeting", id))?;
        row_to_meeting(&row)
    }

    /// Meeting with its attendance and the activity's roster, without creating anything.
    pub async fn get_meeting_detail(&self, id: i64) -> Result<MeetingDetail, DatabaseError> {
        let meeting = self.get_meeting(id).await?;
        self.meeting_detail(meeting, false).await
    }

    pub async fn list_meetings(&self, activity_id: i64) -> Result<Vec<Meeting>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM meetings WHERE activity_id = ?1 ORDER BY date"),
                [activity_id],
            )
            .await?;

        let mut meetings = Vec::new();
        while let Some(row) = rows.next().await? {
            meetings.push(row_to_meeting(&row)?);
        }
        Ok(meetings)
    }

    /// Attendance records of a meeting with student names, ordered by last, first.
    pub async fn list_attendance(
        &self,
        meeting_id: i64,
    ) -> Result<Vec<AttendanceEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLS}, r.id, r.meeting_id, r.status, r.note
                     FROM attendance_records r
                     JOIN students st ON st.id = r.student_id
                     WHERE r.meeting_id = ?1
                     ORDER BY st.last_name, st.first_name, st.id"
                ),
                [meeting_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            let student = row_to_student(&row)?;
            entries.push(AttendanceEntry {
                record: AttendanceRecord {
                    id: row.get(STUDENT_COL_COUNT)?,
                    meeting_id: row.get(STUDENT_COL_COUNT + 1)?,
                    student_id: student.id,
                    status: parse_enum(&row.get::<String>(STUDENT_COL_COUNT + 2)?)?,
                    note: get_opt_string(&row, STUDENT_COL_COUNT + 3)?,
                },
                display_name: student.display_name(),
            });
        }
        Ok(entries)
    }

    /// Apply a batch of attendance entries, each upserted by `(meeting, student)`.
    ///
    /// Best-effort per entry: malformed entries and unknown students are
    /// skipped and counted, never failing the batch.
    pub async fn update_attendance(
        &self,
        meeting_id: i64,
        entries: &[AttendanceInput],
    ) -> Result<AttendanceUpdateResponse, DatabaseError> {
        self.require_identity()?;
        self.get_meeting(meeting_id).await?;

        let conn = self.db().conn();
        let mut applied = 0;
        let mut skipped = 0;
        for (index, entry) in entries.iter().enumerate() {
            let Some((student_id, status)) = entry.resolve() else {
                tracing::warn!(meeting_id, index, ?entry, "skipping malformed attendance entry");
                skipped += 1;
                continue;
            };
            let note = entry.note.as_deref().filter(|n| !n.trim().is_empty());
            let result = conn
                .execute(
                    "INSERT INTO attendance_records (meeting_id, student_id, status, note)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT (meeting_id, student_id)
                     DO UPDATE SET status = excluded.status, note = excluded.note",
                    libsql::params![meeting_id, student_id, status.as_str(), note],
                )
                .await;
            match result {
                Ok(_) => applied += 1,
                Err(e) => {
                    tracing::warn!(meeting_id, student_id, error = %e, "attendance entry not applied");
                    skipped += 1;
                }
            }
        }

        tracing::debug!(meeting_id, applied, skipped, "attendance updated");
        Ok(AttendanceUpdateResponse {
            meeting_id,
            applied,
            skipped,
        })
    }

    async fn meeting_detail(
        &self,
        meeting: Meeting,
        created: bool,
    ) -> Result<MeetingDetail, DatabaseError> {
        let attendance = self.list_attendance(meeting.id).await?;
        let enrolled_students = self
            .enrolled_students(meeting.activity_id, EnrollmentStatus::Active)
            .await?
            .iter()
            .map(StudentRef::from)
            .collect();
        let waitlist_students = self
            .enrolled_students(meeting.activity_id, EnrollmentStatus::Waiting)
            .await?
            .iter()
            .map(StudentRef::from)
            .collect();
        let is_cancelled = self
            .find_cancellation(meeting.activity_id, meeting.date)
            .await?
            .is_some();

        Ok(MeetingDetail {
            meeting,
            created,
            is_cancelled,
            attendance,
            enrolled_students,
            waitlist_students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, create_test_student, date,
        test_service,
    };
    use roster_core::enums::{ActivityType, DayOfWeek};

    struct Fixture {
        svc: RosterService,
        activity_id: i64,
        active: Vec<i64>,
        waiting: i64,
    }

    async fn fixture() -> Fixture {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let activity =
            create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
                .await;
        let a = create_test_student(&svc, "Ada", "Lovelace").await.id;
        let b = create_test_student(&svc, "Grace", "Hopper").await.id;
        let w = create_test_student(&svc, "Alan", "Turing").await.id;
        svc.reconcile_enrollment(activity.id, &[a, b], &[w])
            .await
            .unwrap();
        Fixture {
            svc,
            activity_id: activity.id,
            active: vec![a, b],
            waiting: w,
        }
    }

    #[tokio::test]
    async fn creation_seeds_active_enrollments_only() {
        let f = fixture().await;
        let detail = f
            .svc
            .get_or_create_meeting(f.activity_id, date("2025-09-08"))
            .await
            .unwrap();

        assert!(detail.created);
        assert_eq!(detail.attendance.len(), 2);
        assert!(
            detail
                .attendance
                .iter()
                .all(|e| e.record.status == AttendanceStatus::Scheduled)
        );
        assert!(
            detail
                .attendance
                .iter()
                .all(|e| e.record.student_id != f.waiting)
        );
        assert_eq!(detail.enrolled_students.len(), 2);
        assert_eq!(detail.waitlist_students.len(), 1);
        assert_eq!(detail.attendance[0].display_name, "Hopper, Grace");
    }

    #[tokio::test]
    async fn second_call_returns_same_meeting_without_reseeding() {
        let f = fixture().await;
        let first = f
            .svc
            .get_or_create_meeting(f.activity_id, date("2025-09-08"))
            .await
            .unwrap();

        // A student enrolled after creation must not be seeded retroactively.
        let late = create_test_student(&f.svc, "Late", "Comer").await.id;
        let mut enrolled = f.active.clone();
        enrolled.push(late);
        f.svc
            .reconcile_enrollment(f.activity_id, &enrolled, &[f.waiting])
            .await
            .unwrap();

        let second = f
            .svc
            .get_or_create_meeting(f.activity_id, date("2025-09-08"))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.meeting.id, first.meeting.id);
        assert_eq!(second.attendance.len(), 2);
        assert_eq!(f.svc.list_meetings(f.activity_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_attendance_skips_malformed_entries() {
        let f = fixture().await;
        let meeting = f
            .svc
            .get_or_create_meeting(f.activity_id, date("2025-09-08"))
            .await
            .unwrap()
            .meeting;

        let entries = vec![
            AttendanceInput::new(f.active[0], AttendanceStatus::Present),
            AttendanceInput {
                student_id: Some(f.active[1]),
                status: Some("expected_absence".into()),
                note: Some("travelling".into()),
            },
            AttendanceInput {
                student_id: None,
                status: Some("present".into()),
                note: None,
            },
            AttendanceInput {
                student_id: Some(f.waiting),
                status: None,
                note: None,
            },
            AttendanceInput {
                student_id: Some(f.waiting),
                status: Some("late".into()),
                note: None,
            },
            AttendanceInput::new(424_242, AttendanceStatus::Present),
        ];
        let response = f.svc.update_attendance(meeting.id, &entries).await.unwrap();
        assert_eq!(response.applied, 2);
        assert_eq!(response.skipped, 4);

        let attendance = f.svc.list_attendance(meeting.id).await.unwrap();
        let by_student = |id: i64| {
            attendance
                .iter()
                .find(|e| e.record.student_id == id)
                .map(|e| e.record.clone())
                .unwrap()
        };
        assert_eq!(by_student(f.active[0]).status, AttendanceStatus::Present);
        let absent = by_student(f.active[1]);
        assert_eq!(absent.status, AttendanceStatus::ExpectedAbsence);
        assert_eq!(absent.note.as_deref(), Some("travelling"));
    }

    #[tokio::test]
    async fn walk_in_gets_a_record_without_enrollment() {
        let f = fixture().await;
        let meeting = f
            .svc
            .get_or_create_meeting(f.activity_id, date("2025-09-08"))
            .await
            .unwrap()
            .meeting;
        let walk_in = f
            .svc
            .quick_create_student("Walk", "In", None, None)
            .await
            .unwrap();

        f.svc
            .update_attendance(
                meeting.id,
                &[AttendanceInput::new(walk_in.id, AttendanceStatus::Present)],
            )
            .await
            .unwrap();

        assert_eq!(f.svc.list_attendance(meeting.id).await.unwrap().len(), 3);
        assert!(
            f.svc
                .list_enrollments(f.activity_id)
                .await
                .unwrap()
                .iter()
                .all(|e| e.student_id != walk_in.id)
        );
    }

    #[tokio::test]
    async fn update_on_missing_meeting_is_not_found() {
        let f = fixture().await;
        let result = f.svc.update_attendance(777, &[]).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
