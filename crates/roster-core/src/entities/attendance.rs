use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AttendanceStatus;

/// A student's recorded presence or absence for one meeting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub meeting_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}
