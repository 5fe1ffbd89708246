//! Sheets client error types.

use roster_core::export::ExportError;
use thiserror::Error;

/// Errors that can occur while exporting to Google Sheets.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The credentials file is missing, unreadable, or lacks a refresh token.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// The OAuth token endpoint rejected the refresh.
    #[error("token refresh failed ({status}): {message}")]
    Refresh { status: u16, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Drive or Sheets returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Export settings are incomplete.
    #[error(transparent)]
    Config(#[from] roster_config::ConfigError),
}

impl From<SheetsError> for ExportError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::Credentials(msg) => Self::Credentials(msg),
            SheetsError::Refresh { status, message } => {
                Self::Credentials(format!("token refresh failed ({status}): {message}"))
            }
            SheetsError::Config(e) => Self::Credentials(e.to_string()),
            SheetsError::Http(e) => Self::Transport(e.to_string()),
            SheetsError::Api { status, message } => Self::Service { status, message },
            SheetsError::Parse(msg) => Self::Response(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_status() {
        let err = ExportError::from(SheetsError::Api {
            status: 404,
            message: "File not found: folder-1".into(),
        });
        assert!(matches!(err, ExportError::Service { status: 404, .. }));
        assert!(err.to_string().contains("folder-1"));
    }

    #[test]
    fn refresh_failures_are_credential_errors() {
        let err = ExportError::from(SheetsError::Refresh {
            status: 400,
            message: "invalid_grant".into(),
        });
        assert!(matches!(err, ExportError::Credentials(_)));
    }
}
