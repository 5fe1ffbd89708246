//! Authorized-user credentials file.
//!
//! The file holds the OAuth client id/secret, a long-lived refresh token and
//! the most recent access token with its expiry. Fields this crate does not
//! use are kept and written back untouched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SheetsError;

/// Contents of the credentials file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizedUser {
    /// Current access token, if one has been issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthorizedUser {
    /// Whether the access token is missing or expires within `buffer`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        match (&self.token, self.expiry) {
            (Some(token), Some(expiry)) if !token.is_empty() => expiry - buffer <= now,
            _ => true,
        }
    }
}

/// Reads and rewrites the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns `SheetsError::Credentials` if the file is missing or malformed.
    pub fn load(&self) -> Result<AuthorizedUser, SheetsError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            SheetsError::Credentials(format!(
                "credentials file is missing or unreadable at {}: {e}",
                self.path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            SheetsError::Credentials(format!("invalid credentials file {}: {e}", self.path.display()))
        })
    }

    /// Write `creds` back, owner-readable only on Unix.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Credentials` if the file cannot be written.
    pub fn save(&self, creds: &AuthorizedUser) -> Result<(), SheetsError> {
        let json = serde_json::to_string_pretty(creds)
            .map_err(|e| SheetsError::Credentials(format!("serialize credentials: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            SheetsError::Credentials(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("failed to chmod 0600 {}: {e}", self.path.display());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "token": "ya29.old",
        "refresh_token": "1//refresh",
        "token_uri": "https://oauth2.googleapis.com/token",
        "client_id": "client.apps.googleusercontent.com",
        "client_secret": "secret",
        "scopes": ["https://www.googleapis.com/auth/spreadsheets"],
        "universe_domain": "googleapis.com",
        "expiry": "2025-11-09T21:25:00.123456Z"
    }"#;

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[test]
    fn needs_refresh_respects_buffer() {
        let creds: AuthorizedUser = serde_json::from_str(SAMPLE).unwrap();
        let buffer = Duration::seconds(60);
        assert!(!creds.needs_refresh(at("2025-11-09T21:20:00Z"), buffer));
        assert!(creds.needs_refresh(at("2025-11-09T21:24:30Z"), buffer));
        assert!(creds.needs_refresh(at("2025-11-10T00:00:00Z"), buffer));
    }

    #[test]
    fn missing_token_always_needs_refresh() {
        let mut creds: AuthorizedUser = serde_json::from_str(SAMPLE).unwrap();
        creds.token = None;
        assert!(creds.needs_refresh(at("2020-01-01T00:00:00Z"), Duration::zero()));
    }

    #[test]
    fn save_preserves_unknown_fields() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("token.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let store = CredentialStore::new(&path);

        let mut creds = store.load().unwrap();
        creds.token = Some("ya29.new".into());
        store.save(&creds).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.token.as_deref(), Some("ya29.new"));
        assert_eq!(reloaded.extra["universe_domain"], "googleapis.com");
        assert_eq!(reloaded, creds);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }
    }

    #[test]
    fn missing_file_is_a_credentials_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::new(tmp.path().join("absent.json"));
        assert!(matches!(store.load(), Err(SheetsError::Credentials(_))));
    }
}
