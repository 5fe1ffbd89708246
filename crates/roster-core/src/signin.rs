//! Sign-in sheet layout.
//!
//! ```text
//! row 1   title
//! row 2   ""            | 9/8 | 9/22 | ...
//! rows    enrolled students ("Last, First")
//! blank
//! "Wait List/Drop Ins:"
//! rows    waitlisted students
//! 3 blank rows for walk-ins
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::entities::{Activity, Session};
use crate::export::{SheetExport, SheetLayout};

pub const WAITLIST_HEADER: &str = "Wait List/Drop Ins:";
pub const TRAILING_BLANK_ROWS: usize = 3;

/// Spreadsheet title, e.g. `"Fall 2025 - Monday Zumba"`.
#[must_use]
pub fn sheet_title(session: &Session, activity: &Activity) -> String {
    format!(
        "{} - {} {}",
        session.name,
        activity.day_of_week.label(),
        activity.activity_type.label()
    )
}

/// Worksheet label from a timestamp, e.g. `"Nov 9, 2025 4:25pm"`.
#[must_use]
pub fn worksheet_label(at: NaiveDateTime) -> String {
    let lowered = at.format("%b %-d, %Y %-I:%M%p").to_string().to_lowercase();
    let mut chars = lowered.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Everything needed to lay out one sheet.
#[derive(Debug, Clone)]
pub struct SignInSheetInput<'a> {
    pub title: String,
    pub folder_id: &'a str,
    pub worksheet_label: String,
    pub dates: &'a [NaiveDate],
    /// Display names, already ordered.
    pub enrolled: &'a [String],
    /// Display names, already ordered.
    pub waitlisted: &'a [String],
}

/// Build the full row payload for a sign-in sheet.
#[must_use]
pub fn build_sheet(input: &SignInSheetInput<'_>) -> SheetExport {
    let width = input.dates.len() + 1;
    let padded = |first: &str| {
        let mut row = vec![String::new(); width];
        row[0] = first.to_string();
        row
    };

    let mut rows = Vec::with_capacity(input.enrolled.len() + input.waitlisted.len() + 7);
    rows.push(padded(&input.title));

    let mut header = vec![String::new()];
    header.extend(input.dates.iter().map(|d| d.format("%-m/%-d").to_string()));
    rows.push(header);

    rows.extend(input.enrolled.iter().map(|name| padded(name)));
    rows.push(padded(""));
    rows.push(padded(WAITLIST_HEADER));
    rows.extend(input.waitlisted.iter().map(|name| padded(name)));
    rows.extend((0..TRAILING_BLANK_ROWS).map(|_| padded("")));

    SheetExport {
        title: input.title.clone(),
        folder_id: input.folder_id.to_string(),
        worksheet_label: input.worksheet_label.clone(),
        rows,
        layout: SheetLayout {
            date_columns: input.dates.len(),
            enrolled_rows: input.enrolled.len(),
            waitlist_rows: input.waitlisted.len(),
        },
    }
}
