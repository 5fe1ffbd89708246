//! # roster-sheets
//!
//! Google Sheets export client for Roster sign-in sheets.
//!
//! - Authorized-user credentials file, rewritten after each token refresh
//! - Access-token manager with an expiry buffer
//! - Drive lookup/creation of the per-activity spreadsheet
//! - Worksheet creation, value writes and formatting through the Sheets API
//!
//! [`SheetsClient`] implements [`roster_core::export::SheetExporter`], so the
//! service layer never depends on this crate directly.

pub mod client;
pub mod credentials;
mod error;
pub mod format;
mod http;
pub mod token;

pub use client::SheetsClient;
pub use error::SheetsError;
