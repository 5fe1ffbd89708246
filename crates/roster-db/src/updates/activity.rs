//! Activity update builder.

use chrono::NaiveTime;
use roster_core::enums::{ActivityType, DayOfWeek};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

pub struct ActivityUpdateBuilder(ActivityUpdate);

impl ActivityUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ActivityUpdate::default())
    }

    #[must_use]
    pub const fn activity_type(mut self, activity_type: ActivityType) -> Self {
        self.0.activity_type = Some(activity_type);
        self
    }

    #[must_use]
    pub const fn day_of_week(mut self, day_of_week: DayOfWeek) -> Self {
        self.0.day_of_week = Some(day_of_week);
        self
    }

    #[must_use]
    pub const fn time(mut self, time: NaiveTime) -> Self {
        self.0.time = Some(time);
        self
    }

    #[must_use]
    pub const fn location_id(mut self, location_id: Option<i64>) -> Self {
        self.0.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub const fn max_capacity(mut self, max_capacity: Option<i64>) -> Self {
        self.0.max_capacity = Some(max_capacity);
        self
    }

    #[must_use]
    pub const fn closed(mut self, closed: bool) -> Self {
        self.0.closed = Some(closed);
        self
    }

    #[must_use]
    pub fn build(self) -> ActivityUpdate {
        self.0
    }
}
