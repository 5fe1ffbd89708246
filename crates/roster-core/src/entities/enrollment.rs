use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EnrollmentStatus;

/// A student's registration on an activity. At most one row per (student, activity).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub activity_id: i64,
    pub status: EnrollmentStatus,
    pub date_enrolled: NaiveDate,
}
