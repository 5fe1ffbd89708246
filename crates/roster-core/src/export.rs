//! Seam between the service layer and the spreadsheet export collaborator.
//!
//! The service builds a finished [`SheetExport`] and hands it to a
//! [`SheetExporter`]; the exporter returns a shareable URL. Nothing is written
//! to the database on either side of this call.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of the rows in a sign-in sheet, used by exporters for formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub date_columns: usize,
    pub enrolled_rows: usize,
    pub waitlist_rows: usize,
}

/// A finished tabular payload ready to be written to a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetExport {
    /// Spreadsheet (file) title; also the text of the first row.
    pub title: String,
    /// Folder the spreadsheet lives in.
    pub folder_id: String,
    /// Name of the worksheet (tab) this export adds.
    pub worksheet_label: String,
    /// Every row, top to bottom, each the same width.
    pub rows: Vec<Vec<String>>,
    pub layout: SheetLayout,
}

/// Failure of the external spreadsheet service.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Credentials are missing, unreadable, or could not be refreshed.
    #[error("export credentials unavailable: {0}")]
    Credentials(String),

    /// The remote service answered with an error.
    #[error("export service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The request never completed.
    #[error("export transport error: {0}")]
    Transport(String),

    /// The remote service answered with something unexpected.
    #[error("export response error: {0}")]
    Response(String),
}

/// External spreadsheet service.
pub trait SheetExporter {
    /// Write `sheet` and return a shareable URL for it.
    fn export(&self, sheet: &SheetExport) -> impl Future<Output = Result<String, ExportError>> + Send;
}
