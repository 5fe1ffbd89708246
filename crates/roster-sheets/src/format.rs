//! Sheets API request bodies for sign-in sheet formatting.
//!
//! Indices are zero-based and end-exclusive, as the Sheets API expects.

use roster_core::export::SheetLayout;
use serde_json::{Value, json};

/// Rows above the enrolled block: title and date header.
const HEADER_ROWS: usize = 2;
/// Blank separator plus the waitlist header row.
const WAITLIST_GAP: usize = 2;
/// Blank rows left for walk-ins.
const WALK_IN_ROWS: usize = 3;

fn solid() -> Value {
    json!({ "style": "SOLID" })
}

/// `batchUpdate` requests that style a freshly written sign-in sheet.
#[must_use]
pub fn signin_requests(sheet_id: i64, layout: &SheetLayout) -> Vec<Value> {
    let columns = layout.date_columns + 1;
    let waitlist_header = HEADER_ROWS + layout.enrolled_rows + 1;
    let last_row = HEADER_ROWS + layout.enrolled_rows + WAITLIST_GAP + layout.waitlist_rows + WALK_IN_ROWS;
    let range = |start_row: usize, end_row: usize, start_col: usize, end_col: usize| {
        json!({
            "sheetId": sheet_id,
            "startRowIndex": start_row,
            "endRowIndex": end_row,
            "startColumnIndex": start_col,
            "endColumnIndex": end_col,
        })
    };

    vec![
        json!({ "mergeCells": { "range": range(0, 1, 0, columns), "mergeType": "MERGE_ALL" } }),
        json!({ "repeatCell": {
            "range": range(0, 1, 0, 1),
            "cell": { "userEnteredFormat": {
                "textFormat": { "bold": true, "fontSize": 18 },
                "horizontalAlignment": "CENTER",
            }},
            "fields": "userEnteredFormat(textFormat,horizontalAlignment)",
        }}),
        json!({ "repeatCell": {
            "range": range(1, 2, 1, columns),
            "cell": { "userEnteredFormat": {
                "textFormat": { "bold": true },
                "horizontalAlignment": "CENTER",
            }},
            "fields": "userEnteredFormat(textFormat,horizontalAlignment)",
        }}),
        json!({ "repeatCell": {
            "range": range(waitlist_header, waitlist_header + 1, 0, 1),
            "cell": { "userEnteredFormat": { "textFormat": { "bold": true } } },
            "fields": "userEnteredFormat.textFormat",
        }}),
        json!({ "updateBorders": {
            "range": range(1, last_row, 0, columns),
            "top": solid(),
            "bottom": solid(),
            "left": solid(),
            "right": solid(),
            "innerHorizontal": solid(),
            "innerVertical": solid(),
        }}),
        json!({ "autoResizeDimensions": { "dimensions": {
            "sheetId": sheet_id,
            "dimension": "COLUMNS",
            "startIndex": 0,
            "endIndex": columns,
        }}}),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> SheetLayout {
        SheetLayout {
            date_columns: 7,
            enrolled_rows: 10,
            waitlist_rows: 2,
        }
    }

    #[test]
    fn title_merge_spans_every_column() {
        let requests = signin_requests(42, &layout());
        let merge = &requests[0]["mergeCells"]["range"];
        assert_eq!(merge["sheetId"], 42);
        assert_eq!(merge["endColumnIndex"], 8);
    }

    #[test]
    fn waitlist_header_follows_enrolled_block_and_blank_row() {
        let requests = signin_requests(1, &layout());
        let header = &requests[3]["repeatCell"]["range"];
        // title, dates, 10 enrolled, blank -> row index 13
        assert_eq!(header["startRowIndex"], 13);
    }

    #[test]
    fn borders_cover_through_walk_in_rows() {
        let requests = signin_requests(1, &layout());
        let borders = &requests[4]["updateBorders"]["range"];
        assert_eq!(borders["startRowIndex"], 1);
        assert_eq!(borders["endRowIndex"], 2 + 10 + 2 + 2 + 3);
    }
}
