//! Calendar rules for weekly activities.
//!
//! An activity meets once a week on its day-of-week for the length of its
//! session. The effective occurrence set is that weekly schedule minus
//! cancelled dates; meeting rows play no part in it.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::entities::Session;
use crate::enums::DayOfWeek;
use crate::errors::CoreError;

/// Date format accepted on every input boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest sign-in sheet, in weeks.
pub const MAX_SHEET_WEEKS: u32 = 52;

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` when the string is not a
/// valid calendar date in that format.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::Validation(format!("{field} must be in format YYYY-MM-DD")))
}

/// Every date between `start` and `end` (inclusive) falling on `day`.
#[must_use]
pub fn weekly_dates(start: NaiveDate, end: NaiveDate, day: DayOfWeek) -> Vec<NaiveDate> {
    let offset = days_until(start.weekday(), day.to_weekday());
    let Some(mut current) = start.checked_add_days(Days::new(offset)) else {
        return Vec::new();
    };

    let mut dates = Vec::new();
    while current <= end {
        dates.push(current);
        match current.checked_add_days(Days::new(7)) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Weekly schedule of an activity across its session, minus cancelled dates.
#[must_use]
pub fn effective_occurrences(
    session: &Session,
    day: DayOfWeek,
    cancelled: &BTreeSet<NaiveDate>,
) -> Vec<NaiveDate> {
    weekly_dates(session.start_date, session.end_date, day)
        .into_iter()
        .filter(|date| !cancelled.contains(date))
        .collect()
}

/// Sunday-through-Saturday window starting at `week_start`.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `week_start` is not a Sunday.
pub fn week_window(week_start: NaiveDate) -> Result<(NaiveDate, NaiveDate), CoreError> {
    if week_start.weekday() != Weekday::Sun {
        return Err(CoreError::Validation(format!(
            "week_start must be a Sunday, got {} ({})",
            week_start,
            DayOfWeek::from_weekday(week_start.weekday())
        )));
    }
    let end = week_start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| CoreError::Validation("week_start is out of range".into()))?;
    Ok((week_start, end))
}

/// Column dates for a sign-in sheet: `num_weeks` weekly steps from `start`,
/// with cancelled dates left out.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `num_weeks` is outside `1..=52`.
pub fn sheet_dates(
    start: NaiveDate,
    num_weeks: u32,
    cancelled: &BTreeSet<NaiveDate>,
) -> Result<Vec<NaiveDate>, CoreError> {
    if !(1..=MAX_SHEET_WEEKS).contains(&num_weeks) {
        return Err(CoreError::Validation(format!(
            "num_weeks must be between 1 and {MAX_SHEET_WEEKS}"
        )));
    }
    let mut dates = Vec::with_capacity(num_weeks as usize);
    for week in 0..u64::from(num_weeks) {
        let date = start
            .checked_add_days(Days::new(week * 7))
            .ok_or_else(|| CoreError::Validation("start_date is out of range".into()))?;
        if !cancelled.contains(&date) {
            dates.push(date);
        }
    }
    Ok(dates)
}

fn days_until(from: Weekday, to: Weekday) -> u64 {
    let from = u64::from(from.num_days_from_monday());
    let to = u64::from(to.num_days_from_monday());
    (to + 7 - from) % 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw, "date").unwrap()
    }

    fn fall_2025() -> Session {
        Session {
            id: 1,
            organization_id: 1,
            name: "Fall 2025".into(),
            start_date: date("2025-09-01"),
            end_date: date("2025-12-15"),
            closed: false,
        }
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        let err = parse_date("09/08/2025", "week_start").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("week_start"));
    }

    #[test]
    fn weekly_dates_start_on_first_matching_day() {
        let dates = weekly_dates(date("2025-09-02"), date("2025-09-30"), DayOfWeek::Monday);
        assert_eq!(
            dates,
            vec![
                date("2025-09-08"),
                date("2025-09-15"),
                date("2025-09-22"),
                date("2025-09-29"),
            ]
        );
    }

    #[test]
    fn weekly_dates_include_both_bounds() {
        let dates = weekly_dates(date("2025-09-01"), date("2025-09-15"), DayOfWeek::Monday);
        assert_eq!(
            dates,
            vec![date("2025-09-01"), date("2025-09-08"), date("2025-09-15")]
        );
    }

    #[test]
    fn weekly_dates_empty_when_range_inverted() {
        assert!(weekly_dates(date("2025-09-10"), date("2025-09-01"), DayOfWeek::Monday).is_empty());
    }

    #[test]
    fn effective_occurrences_drop_cancelled_dates() {
        let session = fall_2025();
        let cancelled = BTreeSet::from([date("2025-09-15")]);
        let dates = effective_occurrences(&session, DayOfWeek::Monday, &cancelled);

        assert_eq!(dates.first(), Some(&date("2025-09-01")));
        assert_eq!(dates.last(), Some(&date("2025-12-15")));
        assert!(!dates.contains(&date("2025-09-15")));
        assert!(dates.contains(&date("2025-09-08")));
        assert_eq!(dates.len(), 15);
    }

    #[rstest]
    #[case("2025-09-07", true)]
    #[case("2025-09-08", false)]
    #[case("2025-09-13", false)]
    fn week_window_requires_sunday(#[case] start: &str, #[case] ok: bool) {
        let result = week_window(date(start));
        assert_eq!(result.is_ok(), ok);
        if let Ok((from, to)) = result {
            assert_eq!(from, date(start));
            assert_eq!(to, date("2025-09-13"));
        }
    }

    #[rstest]
    #[case(0)]
    #[case(53)]
    fn sheet_dates_reject_out_of_range_weeks(#[case] weeks: u32) {
        let err = sheet_dates(date("2025-09-08"), weeks, &BTreeSet::new()).unwrap_err();
        assert!(err.to_string().contains("num_weeks"));
    }

    #[test]
    fn sheet_dates_skip_cancellations() {
        let cancelled = BTreeSet::from([date("2025-09-15")]);
        let dates = sheet_dates(date("2025-09-08"), 3, &cancelled).unwrap();
        assert_eq!(dates, vec![date("2025-09-08"), date("2025-09-22")]);
    }
}
