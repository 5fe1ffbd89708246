//! Status enums and schedule enums for Roster.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! and `as_str()` returns the same string that is stored in SQL.

use chrono::Weekday;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActivityType
// ---------------------------------------------------------------------------

/// Kind of fitness class an activity runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Zumba,
    ZumbaGold,
    Pound,
}

impl ActivityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zumba => "zumba",
            Self::ZumbaGold => "zumba_gold",
            Self::Pound => "pound",
        }
    }

    /// Human-facing name used in reports, sheet titles and email bodies.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zumba => "Zumba",
            Self::ZumbaGold => "Zumba Gold",
            Self::Pound => "Pound",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

/// Day of the week an activity meets.
///
/// Ordering follows the report convention: Monday first, Sunday last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    #[must_use]
    pub const fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }

    #[must_use]
    pub const fn to_weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
            Self::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EnrollmentStatus
// ---------------------------------------------------------------------------

/// A student's registration status on an activity.
///
/// Reconciliation only ever writes `active` and `waiting`; `dropped` and
/// `not_enrolled` are kept for rows edited by staff directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Waiting,
    Dropped,
    NotEnrolled,
}

impl EnrollmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::Dropped => "dropped",
            Self::NotEnrolled => "not_enrolled",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AttendanceStatus
// ---------------------------------------------------------------------------

/// Attendance of one student at one meeting.
///
/// ```text
/// scheduled → present
///           → unexpected_absence
///           → expected_absence
/// ```
///
/// Seeded records start as `scheduled`. After that any status may be set
/// directly so staff can correct mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    UnexpectedAbsence,
    ExpectedAbsence,
    Scheduled,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::UnexpectedAbsence => "unexpected_absence",
            Self::ExpectedAbsence => "expected_absence",
            Self::Scheduled => "scheduled",
        }
    }

    #[must_use]
    pub const fn is_absence(self) -> bool {
        matches!(self, Self::UnexpectedAbsence | Self::ExpectedAbsence)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(type_zumba_gold, ActivityType, ActivityType::ZumbaGold, "zumba_gold");
    test_serde_roundtrip!(day_monday, DayOfWeek, DayOfWeek::Monday, "monday");
    test_serde_roundtrip!(
        enrollment_not_enrolled,
        EnrollmentStatus,
        EnrollmentStatus::NotEnrolled,
        "not_enrolled"
    );
    test_serde_roundtrip!(
        attendance_unexpected,
        AttendanceStatus,
        AttendanceStatus::UnexpectedAbsence,
        "unexpected_absence"
    );

    #[test]
    fn as_str_matches_serde() {
        for day in DayOfWeek::ALL {
            let json = serde_json::to_string(&day).unwrap();
            assert_eq!(json, format!("\"{}\"", day.as_str()));
        }
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::UnexpectedAbsence,
            AttendanceStatus::ExpectedAbsence,
            AttendanceStatus::Scheduled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn weekday_conversion_roundtrips() {
        for day in DayOfWeek::ALL {
            assert_eq!(DayOfWeek::from_weekday(day.to_weekday()), day);
        }
    }

    #[test]
    fn days_sort_monday_first() {
        let mut days = vec![DayOfWeek::Sunday, DayOfWeek::Wednesday, DayOfWeek::Monday];
        days.sort();
        assert_eq!(
            days,
            vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Sunday]
        );
    }

    #[test]
    fn enrollment_defaults_to_active() {
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Active);
    }

    #[test]
    fn only_absences_are_absences() {
        assert!(AttendanceStatus::ExpectedAbsence.is_absence());
        assert!(AttendanceStatus::UnexpectedAbsence.is_absence());
        assert!(!AttendanceStatus::Present.is_absence());
        assert!(!AttendanceStatus::Scheduled.is_absence());
    }
}
