use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Marks that an activity does not take place on `date`, whether or not a
/// meeting row was already created for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Cancellation {
    pub id: i64,
    pub activity_id: i64,
    pub date: NaiveDate,
    pub reason: Option<String>,
}
