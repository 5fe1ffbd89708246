//! Response projections returned by service operations.
//!
//! Each operation that returns more than a bare entity has exactly one struct
//! here describing its shape.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Activity, AttendanceRecord, Contact, Meeting, Organization, Session, Student};
use crate::enums::{DayOfWeek, EnrollmentStatus};

/// Organization with its contacts and sessions split around a reference date.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrganizationOverview {
    pub organization: Organization,
    pub contacts: Vec<Contact>,
    pub current_session: Option<Session>,
    pub future_sessions: Vec<Session>,
    pub past_sessions: Vec<Session>,
    /// Open activities of the current session.
    pub current_activities: Vec<Activity>,
}

/// Session with its organization and every activity under it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionDetail {
    pub session: Session,
    pub organization: Organization,
    pub activities: Vec<Activity>,
}

/// Result of closing a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionCloseResponse {
    pub session: Session,
    pub activities_closed: u64,
}

/// Result of copying activities between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActivityCopyResponse {
    pub target_session_id: i64,
    pub copied: Vec<Activity>,
}

/// Result of merging a duplicate location into a canonical one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocationMergeResponse {
    pub duplicate_id: i64,
    pub canonical_id: i64,
    pub activities_reassigned: u64,
}

/// Minimal student reference used inside other projections.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentRef {
    pub id: i64,
    pub display_name: String,
    pub email: Option<String>,
}

impl From<&Student> for StudentRef {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            display_name: student.display_name(),
            email: student.email.clone(),
        }
    }
}

/// A student's enrollment as shown on the student detail view.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentEnrollmentSummary {
    pub enrollment_id: i64,
    pub status: EnrollmentStatus,
    pub activity: Activity,
    pub session_name: String,
}

/// Student with their enrollments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentDetail {
    pub student: Student,
    pub full_name: String,
    pub display_name: String,
    pub enrollments: Vec<StudentEnrollmentSummary>,
}

/// Result of reconciling an activity's enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReconcileResponse {
    pub activity_id: i64,
    pub enrolled: usize,
    pub waitlisted: usize,
    pub removed: u64,
}

/// One attendance row with its student resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub record: AttendanceRecord,
    pub display_name: String,
}

/// Result of get-or-create on a meeting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MeetingDetail {
    pub meeting: Meeting,
    /// Whether this call created (and seeded) the meeting.
    pub created: bool,
    pub is_cancelled: bool,
    pub attendance: Vec<AttendanceEntry>,
    pub enrolled_students: Vec<StudentRef>,
    pub waitlist_students: Vec<StudentRef>,
}

/// Result of a best-effort attendance batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceUpdateResponse {
    pub meeting_id: i64,
    pub applied: usize,
    pub skipped: usize,
}

/// Attendance breakdown for one activity on one date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceBreakdown {
    pub enrolled_present: u32,
    pub enrolled_unexpected_absent: u32,
    pub enrolled_expected_absent: u32,
    pub waitlist_present: u32,
    pub waitlist_unexpected_absent: u32,
    pub waitlist_expected_absent: u32,
    pub walkin_count: u32,
}

/// Statistics row for one activity on a given date.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActivityAttendanceStats {
    pub activity: Activity,
    pub location_name: Option<String>,
    pub session_name: String,
    pub organization_id: i64,
    pub organization_name: String,
    pub enrolled_count: u32,
    pub waitlist_count: u32,
    pub has_meeting: bool,
    pub is_cancelled: bool,
    pub cancellation_reason: Option<String>,
    pub attendance: AttendanceBreakdown,
}

/// Effective occurrence dates of one activity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OccurrenceSchedule {
    pub activity_id: i64,
    pub dates: Vec<NaiveDate>,
    pub cancelled: Vec<NaiveDate>,
}

/// A named absentee in the weekly report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Absentee {
    pub id: i64,
    /// `"Last, First"`.
    pub name: String,
    pub first_name: String,
    pub last_name: String,
}

/// One meeting in the weekly report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeeklyMeetingRow {
    pub meeting_id: i64,
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub class_type: String,
    pub location: Option<String>,
    /// `HH:MM`, 24-hour.
    pub time: String,
    pub present_count: u32,
    pub unexpected_absences: Vec<Absentee>,
    pub expected_absences: Vec<Absentee>,
}

/// Weekly attendance report for one organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeeklyReport {
    pub organization_name: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub meetings: Vec<WeeklyMeetingRow>,
}

/// Cumulative residency split for one activity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResidencyRow {
    pub activity_id: i64,
    pub day_of_week: DayOfWeek,
    pub class_type: String,
    pub location: Option<String>,
    pub time: String,
    pub rochester_count: u32,
    pub non_rochester_count: u32,
}

/// Residency report for one session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResidencyReport {
    pub organization_name: String,
    pub session_name: String,
    pub activities: Vec<ResidencyRow>,
}

/// Class description used in communication projections.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassSummary {
    pub id: i64,
    pub day_of_week: DayOfWeek,
    pub class_type: String,
    /// `hh:mm AM/PM`.
    pub time: String,
    pub location: Option<String>,
}

/// One enrollment combination of a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EnrollmentCombination {
    pub combination_id: String,
    pub student_count: usize,
    pub enrolled_classes: Vec<ClassSummary>,
    pub waitlisted_classes: Vec<ClassSummary>,
    pub student_ids: Vec<i64>,
}

/// All enrollment combinations of a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionCombinations {
    pub session_id: i64,
    pub session_name: String,
    pub organization_name: String,
    pub combinations: Vec<EnrollmentCombination>,
}

/// Email composition for one enrollment combination.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EmailDraft {
    pub to_email: String,
    /// Comma-separated addresses.
    pub bcc_emails: String,
    pub subject: String,
    pub body: String,
    pub student_count: usize,
    pub enrolled_classes: Vec<ClassSummary>,
    pub waitlisted_classes: Vec<ClassSummary>,
    pub organization_name: String,
    pub session_name: String,
    pub combination_name: String,
}

/// Result of sign-in sheet generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SignInSheetResponse {
    pub sheet_url: String,
    pub title: String,
    pub worksheet_label: String,
    pub dates: Vec<NaiveDate>,
}
