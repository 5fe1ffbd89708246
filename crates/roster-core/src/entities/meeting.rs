use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One concrete calendar occurrence of an activity. Unique per (activity, date).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Meeting {
    pub id: i64,
    pub activity_id: i64,
    pub date: NaiveDate,
}
