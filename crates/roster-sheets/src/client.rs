//! Drive + Sheets client implementing [`SheetExporter`].
//!
//! One spreadsheet per activity lives in the configured folder, named by the
//! export title. Each export adds a new worksheet to it; when the spreadsheet
//! does not exist yet it is created and its default sheet is renamed instead.

use roster_config::SheetsConfig;
use roster_core::export::{ExportError, SheetExport, SheetExporter};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::credentials::CredentialStore;
use crate::error::SheetsError;
use crate::format::signin_requests;
use crate::http::{check_response, json_body};
use crate::token::TokenManager;

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const SPREADSHEET_URL: &str = "https://docs.google.com/spreadsheets/d";
const MIN_ROWS: usize = 100;
const MIN_COLUMNS: usize = 20;

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

/// Drive query selecting a live spreadsheet named `title` inside `folder_id`.
fn find_query(title: &str, folder_id: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and '{}' in parents and trashed = false",
        escape_query(title),
        escape_query(folder_id)
    )
}

fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A1 range naming the top-left cell of `worksheet`.
fn a1_origin(worksheet: &str) -> String {
    format!("'{}'!A1", worksheet.replace('\'', "''"))
}

fn grid_size(sheet: &SheetExport) -> (usize, usize) {
    (
        sheet.rows.len().max(MIN_ROWS),
        (sheet.layout.date_columns + 1).max(MIN_COLUMNS),
    )
}

pub struct SheetsClient {
    http: reqwest::Client,
    tokens: TokenManager,
    sheets_api_url: String,
    drive_api_url: String,
}

impl SheetsClient {
    /// Build a client from the `[sheets]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Config` when no credentials file is configured,
    /// or `SheetsError::Credentials` when it cannot be loaded.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SheetsError> {
        let http = reqwest::Client::new();
        let tokens = TokenManager::new(
            http.clone(),
            CredentialStore::new(config.credentials_file()?),
            config.token_uri.clone(),
            config.expiry_buffer_secs,
        )?;
        Ok(Self {
            http,
            tokens,
            sheets_api_url: config.sheets_api_url.trim_end_matches('/').to_string(),
            drive_api_url: config.drive_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Write the sheet and return its URL.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if authentication or any API call fails.
    /// Formatting failures are logged and do not fail the export.
    pub async fn write_sheet(&self, sheet: &SheetExport) -> Result<String, SheetsError> {
        let token = self.tokens.access_token().await?;
        let (rows, columns) = grid_size(sheet);

        let (spreadsheet_id, sheet_id) =
            match self.find_spreadsheet(&token, &sheet.title, &sheet.folder_id).await? {
                Some(id) => {
                    tracing::debug!(spreadsheet_id = %id, title = %sheet.title, "spreadsheet found");
                    let sheet_id = self
                        .add_worksheet(&token, &id, &sheet.worksheet_label, rows, columns)
                        .await?;
                    (id, sheet_id)
                }
                None => {
                    let id = self
                        .create_spreadsheet(&token, &sheet.title, &sheet.folder_id)
                        .await?;
                    tracing::info!(spreadsheet_id = %id, title = %sheet.title, "spreadsheet created");
                    let sheet_id = self
                        .rename_first_worksheet(&token, &id, &sheet.worksheet_label, rows, columns)
                        .await?;
                    (id, sheet_id)
                }
            };

        self.write_values(&token, &spreadsheet_id, &sheet.worksheet_label, &sheet.rows)
            .await?;
        if let Err(e) = self
            .batch_update(&token, &spreadsheet_id, signin_requests(sheet_id, &sheet.layout))
            .await
        {
            tracing::warn!(error = %e, spreadsheet_id = %spreadsheet_id, "could not format sign-in sheet");
        }

        Ok(format!("{SPREADSHEET_URL}/{spreadsheet_id}"))
    }

    async fn find_spreadsheet(
        &self,
        token: &str,
        title: &str,
        folder_id: &str,
    ) -> Result<Option<String>, SheetsError> {
        let url = format!(
            "{}/files?q={}&spaces=drive&fields={}",
            self.drive_api_url,
            urlencoding::encode(&find_query(title, folder_id)),
            urlencoding::encode("files(id,name)")
        );
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let list: FileList = json_body(check_response(resp).await?).await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_spreadsheet(
        &self,
        token: &str,
        title: &str,
        folder_id: &str,
    ) -> Result<String, SheetsError> {
        let url = format!("{}/files?fields=id", self.drive_api_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({
                "name": title,
                "mimeType": SPREADSHEET_MIME,
                "parents": [folder_id],
            }))
            .send()
            .await?;
        let file: DriveFile = json_body(check_response(resp).await?).await?;
        Ok(file.id)
    }

    async fn add_worksheet(
        &self,
        token: &str,
        spreadsheet_id: &str,
        label: &str,
        rows: usize,
        columns: usize,
    ) -> Result<i64, SheetsError> {
        let reply = self
            .batch_update(
                token,
                spreadsheet_id,
                vec![json!({ "addSheet": { "properties": {
                    "title": label,
                    "gridProperties": { "rowCount": rows, "columnCount": columns },
                }}})],
            )
            .await?;
        reply["replies"][0]["addSheet"]["properties"]["sheetId"]
            .as_i64()
            .ok_or_else(|| SheetsError::Parse("addSheet reply has no sheetId".into()))
    }

    async fn rename_first_worksheet(
        &self,
        token: &str,
        spreadsheet_id: &str,
        label: &str,
        rows: usize,
        columns: usize,
    ) -> Result<i64, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{spreadsheet_id}?fields={}",
            self.sheets_api_url,
            urlencoding::encode("sheets.properties.sheetId")
        );
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let meta: SpreadsheetMeta = json_body(check_response(resp).await?).await?;
        let sheet_id = meta
            .sheets
            .first()
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| SheetsError::Parse("new spreadsheet has no worksheet".into()))?;

        self.batch_update(
            token,
            spreadsheet_id,
            vec![json!({ "updateSheetProperties": {
                "properties": {
                    "sheetId": sheet_id,
                    "title": label,
                    "gridProperties": { "rowCount": rows, "columnCount": columns },
                },
                "fields": "title,gridProperties(rowCount,columnCount)",
            }})],
        )
        .await?;
        Ok(sheet_id)
    }

    async fn write_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        label: &str,
        rows: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        let url = format!(
            "{}/spreadsheets/{spreadsheet_id}/values/{}?valueInputOption=RAW",
            self.sheets_api_url,
            urlencoding::encode(&a1_origin(label))
        );
        let resp = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn batch_update(
        &self,
        token: &str,
        spreadsheet_id: &str,
        requests: Vec<Value>,
    ) -> Result<Value, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{spreadsheet_id}:batchUpdate",
            self.sheets_api_url
        );
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        json_body(check_response(resp).await?).await
    }
}

impl SheetExporter for SheetsClient {
    async fn export(&self, sheet: &SheetExport) -> Result<String, ExportError> {
        self.write_sheet(sheet).await.map_err(ExportError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roster_core::export::SheetLayout;

    #[test]
    fn find_query_escapes_quotes() {
        let query = find_query("Fall '25 - Monday Zumba", "folder-1");
        assert_eq!(
            query,
            "name = 'Fall \\'25 - Monday Zumba' and \
             mimeType = 'application/vnd.google-apps.spreadsheet' and \
             'folder-1' in parents and trashed = false"
        );
    }

    #[test]
    fn a1_origin_quotes_worksheet_label() {
        assert_eq!(a1_origin("Nov 9, 2025 4:25pm"), "'Nov 9, 2025 4:25pm'!A1");
        assert_eq!(a1_origin("Bob's"), "'Bob''s'!A1");
    }

    #[test]
    fn grid_grows_for_long_sheets() {
        let sheet = SheetExport {
            title: "t".into(),
            folder_id: "f".into(),
            worksheet_label: "w".into(),
            rows: vec![vec![String::new(); 53]; 120],
            layout: SheetLayout {
                date_columns: 52,
                enrolled_rows: 110,
                waitlist_rows: 3,
            },
        };
        assert_eq!(grid_size(&sheet), (120, 53));

        let small = SheetExport {
            rows: vec![vec![String::new(); 8]; 12],
            layout: SheetLayout {
                date_columns: 7,
                enrolled_rows: 5,
                waitlist_rows: 0,
            },
            ..sheet
        };
        assert_eq!(grid_size(&small), (MIN_ROWS, MIN_COLUMNS));
    }
}
