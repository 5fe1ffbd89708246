//! Row-to-entity parsing helpers and transaction plumbing.
//!
//! Dates are stored as `YYYY-MM-DD` TEXT, times as `HH:MM:SS` TEXT and flags
//! as 0/1 INTEGER.

use chrono::{NaiveDate, NaiveTime};
use roster_core::schedule::DATE_FORMAT;

use crate::error::DatabaseError;

pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all roster-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a 0/1 INTEGER column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored text is not a date.
pub fn get_date(row: &libsql::Row, idx: i32) -> Result<NaiveDate, DatabaseError> {
    let raw = row.get::<String>(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{raw}': {e}")))
}

/// Read a `HH:MM:SS` (or `HH:MM`) TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored text is not a time.
pub fn get_time(row: &libsql::Row, idx: i32) -> Result<NaiveTime, DatabaseError> {
    let raw = row.get::<String>(idx)?;
    NaiveTime::parse_from_str(&raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse time '{raw}': {e}")))
}

#[must_use]
pub fn date_param(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn time_param(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// `?1, ?2, ...` placeholders starting at `start`.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Commit `tx` when `result` is `Ok`, roll it back otherwise.
///
/// # Errors
///
/// Returns the original error, or the commit error when committing fails.
pub async fn finish_tx<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(%rollback, "rollback failed after: {err}");
            }
            Err(err)
        }
    }
}
