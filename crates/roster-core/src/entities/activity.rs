use chrono::{NaiveTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActivityType, DayOfWeek};

/// A recurring weekly class slot within a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Activity {
    pub id: i64,
    pub session_id: i64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub day_of_week: DayOfWeek,
    pub time: NaiveTime,
    pub location_id: Option<i64>,
    /// Advisory only. Enrollment never checks it.
    pub max_capacity: Option<i64>,
    pub closed: bool,
}

impl Activity {
    /// Short descriptive label such as `"Mon Evening Zumba"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            self.day_of_week.abbreviation(),
            time_band(self.time),
            self.activity_type.label()
        )
    }
}

/// Part of the day a class time falls in.
#[must_use]
pub fn time_band(time: NaiveTime) -> &'static str {
    match time.hour() * 60 + time.minute() {
        0..540 => "Early Morning",
        540..720 => "Morning",
        720..1020 => "Afternoon",
        _ => "Evening",
    }
}
