//! Google Sheets / Drive export configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_sheets_api_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_drive_api_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Refresh this many seconds before the access token actually expires.
const fn default_expiry_buffer_secs() -> i64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Drive folder that holds every sign-in spreadsheet.
    #[serde(default)]
    pub folder_id: String,

    /// Authorized-user credentials file (client id/secret, refresh token,
    /// cached access token). Rewritten after each refresh.
    #[serde(default)]
    pub credentials_path: String,

    #[serde(default = "default_sheets_api_url")]
    pub sheets_api_url: String,

    #[serde(default = "default_drive_api_url")]
    pub drive_api_url: String,

    /// Fallback OAuth token endpoint when the credentials file has none.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default = "default_expiry_buffer_secs")]
    pub expiry_buffer_secs: i64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            folder_id: String::new(),
            credentials_path: String::new(),
            sheets_api_url: default_sheets_api_url(),
            drive_api_url: default_drive_api_url(),
            token_uri: default_token_uri(),
            expiry_buffer_secs: default_expiry_buffer_secs(),
        }
    }
}

impl SheetsConfig {
    /// Check that both the folder and the credentials file are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.folder_id.is_empty() && !self.credentials_path.is_empty()
    }

    /// Credentials file path, or `NotConfigured` when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `credentials_path` is empty.
    pub fn credentials_file(&self) -> Result<PathBuf, ConfigError> {
        if self.credentials_path.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "sheets".into(),
            });
        }
        Ok(PathBuf::from(&self.credentials_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = SheetsConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.sheets_api_url, "https://sheets.googleapis.com/v4");
        assert_eq!(config.expiry_buffer_secs, 60);
        assert!(config.credentials_file().is_err());
    }

    #[test]
    fn configured_when_folder_and_credentials_set() {
        let config = SheetsConfig {
            folder_id: "folder-123".into(),
            credentials_path: "/tmp/creds.json".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(
            config.credentials_file().unwrap(),
            PathBuf::from("/tmp/creds.json")
        );
    }
}
