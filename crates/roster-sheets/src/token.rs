//! Access-token lifecycle: expiry check, refresh, persist.
//!
//! The manager owns the credentials for the life of the client. Each request
//! asks for a token; a refresh happens only when the cached one is missing or
//! about to expire, and the refreshed token is written back to the file so
//! the next process starts warm.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::credentials::{AuthorizedUser, CredentialStore};
use crate::error::SheetsError;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: i64,
}

pub struct TokenManager {
    http: reqwest::Client,
    store: CredentialStore,
    creds: Mutex<AuthorizedUser>,
    default_token_uri: String,
    buffer: Duration,
}

impl TokenManager {
    /// Load credentials from `store`.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Credentials` if the file cannot be read or has
    /// no refresh token.
    pub fn new(
        http: reqwest::Client,
        store: CredentialStore,
        default_token_uri: impl Into<String>,
        expiry_buffer_secs: i64,
    ) -> Result<Self, SheetsError> {
        let creds = store.load()?;
        if creds.refresh_token.as_deref().is_none_or(str::is_empty) {
            return Err(SheetsError::Credentials(format!(
                "{} has no refresh token; generate a new credentials file",
                store.path().display()
            )));
        }
        Ok(Self {
            http,
            store,
            creds: Mutex::new(creds),
            default_token_uri: default_token_uri.into(),
            buffer: Duration::seconds(expiry_buffer_secs),
        })
    }

    /// A valid access token, refreshing and persisting first when needed.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Refresh` when the token endpoint rejects the
    /// refresh, or `SheetsError::Credentials` when the result cannot be saved.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut creds = self.creds.lock().await;
        let now = Utc::now();
        if !creds.needs_refresh(now, self.buffer)
            && let Some(token) = &creds.token
        {
            return Ok(token.clone());
        }

        let refreshed = self.refresh(&creds).await?;
        creds.token = Some(refreshed.access_token.clone());
        creds.expiry = Some(expiry_from(now, refreshed.expires_in));
        self.store.save(&creds)?;
        tracing::info!(expiry = ?creds.expiry, "OAuth token refreshed and saved");
        Ok(refreshed.access_token)
    }

    async fn refresh(&self, creds: &AuthorizedUser) -> Result<RefreshResponse, SheetsError> {
        let refresh_token = creds
            .refresh_token
            .as_deref()
            .ok_or_else(|| SheetsError::Credentials("no refresh token".into()))?;
        let token_uri = creds.token_uri.as_deref().unwrap_or(&self.default_token_uri);

        let resp = self
            .http
            .post(token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(refresh_body(&creds.client_id, &creds.client_secret, refresh_token))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SheetsError::Refresh {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        crate::http::json_body(resp).await
    }
}

fn refresh_body(client_id: &str, client_secret: &str, refresh_token: &str) -> String {
    format!(
        "grant_type=refresh_token&client_id={}&client_secret={}&refresh_token={}",
        urlencoding::encode(client_id),
        urlencoding::encode(client_secret),
        urlencoding::encode(refresh_token),
    )
}

fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    now + Duration::seconds(expires_in.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_body_is_form_encoded() {
        let body = refresh_body("id.apps", "s3cr3t/+", "1//abc");
        assert_eq!(
            body,
            "grant_type=refresh_token&client_id=id.apps&client_secret=s3cr3t%2F%2B&refresh_token=1%2F%2Fabc"
        );
    }

    #[test]
    fn expiry_never_precedes_now() {
        let now: DateTime<Utc> = "2025-11-09T21:00:00Z".parse().unwrap();
        assert_eq!(expiry_from(now, 3599) - now, Duration::seconds(3599));
        assert_eq!(expiry_from(now, -5), now);
    }

    #[test]
    fn credentials_without_refresh_token_are_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("token.json");
        std::fs::write(
            &path,
            r#"{"token":"ya29","client_id":"id","client_secret":"secret","refresh_token":null}"#,
        )
        .unwrap();

        let result = TokenManager::new(
            reqwest::Client::new(),
            CredentialStore::new(&path),
            "https://oauth2.googleapis.com/token",
            60,
        );
        assert!(matches!(result, Err(SheetsError::Credentials(_))));
    }

    #[tokio::test]
    async fn fresh_token_is_served_without_refresh() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("token.json");
        let expiry = (Utc::now() + Duration::hours(1)).to_rfc3339();
        std::fs::write(
            &path,
            format!(
                r#"{{"token":"ya29.cached","refresh_token":"1//r","client_id":"id","client_secret":"s","expiry":"{expiry}"}}"#
            ),
        )
        .unwrap();

        // An unroutable token endpoint proves no refresh is attempted.
        let manager = TokenManager::new(
            reqwest::Client::new(),
            CredentialStore::new(&path),
            "http://127.0.0.1:9/token",
            60,
        )
        .unwrap();
        assert_eq!(manager.access_token().await.unwrap(), "ya29.cached");
    }
}
