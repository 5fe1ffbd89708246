//! Shared HTTP response helpers.

use crate::error::SheetsError;

/// Turn a non-success response into [`SheetsError::Api`], carrying the
/// body so Google's error message reaches the caller.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    if !resp.status().is_success() {
        return Err(SheetsError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a JSON body, mapping failures to [`SheetsError::Parse`].
pub async fn json_body<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, SheetsError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SheetsError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let resp = mock_response(403, r#"{"error":{"message":"forbidden"}}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            SheetsError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("forbidden"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn json_body_reports_parse_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Files {
            #[allow(dead_code)]
            files: Vec<String>,
        }
        let err = json_body::<Files>(mock_response(200, "not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SheetsError::Parse(_)));
    }
}
