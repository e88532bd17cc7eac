// src/api/http.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::AnalysisSource;
use crate::error::FetchError;
use crate::model::{AnalysisSnapshot, UpdateResponse};
use crate::settings::Settings;

const ANALYSIS_PATH: &str = "/api/analysis";
const UPDATE_PATH: &str = "/api/update";

/// `reqwest` client for the analysis backend.
pub struct HttpAnalysisClient {
    client: Client,
    base: String,
    analysis_timeout: Duration,
    update_timeout: Duration,
}

impl HttpAnalysisClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_timeouts(
            &settings.api_base_url,
            settings.analysis_timeout(),
            settings.update_timeout(),
        )
    }

    pub fn with_timeouts(base: &str, analysis_timeout: Duration, update_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
            analysis_timeout,
            update_timeout,
        }
    }

    /// GET `path` and read the whole body before `deadline`. Dropping the
    /// request future on expiry aborts the in-flight connection.
    async fn get(&self, path: &str, deadline: Duration) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, timeout_secs = deadline.as_secs_f32(), "GET");

        let request = async {
            let resp = self.client.get(&url).send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, FetchError>((status, body))
        };

        match tokio::time::timeout(deadline, request).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(deadline)),
        }
    }
}

#[async_trait]
impl AnalysisSource for HttpAnalysisClient {
    async fn fetch_analysis(&self) -> Result<AnalysisSnapshot, FetchError> {
        let (status, body) = self.get(ANALYSIS_PATH, self.analysis_timeout).await?;
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        decode_snapshot(&body)
    }

    async fn request_update(&self) -> Result<UpdateResponse, FetchError> {
        let (status, body) = self.get(UPDATE_PATH, self.update_timeout).await?;
        // The backend reports failures as `{status: "error"}` bodies with a 500,
        // so the body is read whatever the status.
        match serde_json::from_str::<UpdateResponse>(&body) {
            Ok(update) => Ok(update),
            Err(_) if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn decode_snapshot(body: &str) -> Result<AnalysisSnapshot, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(FetchError::Malformed("expected a JSON object".to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned response per connection. `delay` holds the response
    /// back to exercise client deadlines.
    async fn serve(status: &'static str, body: &'static str, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    fn client(base: &str) -> HttpAnalysisClient {
        HttpAnalysisClient::with_timeouts(base, Duration::from_millis(300), Duration::from_millis(300))
    }

    #[test]
    fn test_decode_keeps_snapshot_with_null_key_lists() {
        let snapshot = decode_snapshot(
            r#"{"totalDraws": 5, "strategicKeys": {"principal": {"numbers": null, "stars": null}}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.total_draws, Some(5));
    }

    #[tokio::test]
    async fn test_fetch_analysis_success() {
        let base = serve("200 OK", r#"{"totalDraws": 42, "starFrequencies": [1, 2]}"#, Duration::ZERO).await;
        let snapshot = client(&base).fetch_analysis().await.unwrap();
        assert_eq!(snapshot.total_draws, Some(42));
        assert_eq!(snapshot.star_frequencies, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_fetch_analysis_server_error() {
        let base = serve("500 Internal Server Error", r#"{"error": "boom"}"#, Duration::ZERO).await;
        let err = client(&base).fetch_analysis().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_analysis_invalid_json() {
        let base = serve("200 OK", "<html>not json</html>", Duration::ZERO).await;
        let err = client(&base).fetch_analysis().await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_analysis_times_out() {
        let base = serve("200 OK", "{}", Duration::from_secs(5)).await;
        let err = client(&base).fetch_analysis().await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr)).fetch_analysis().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_update_error_body_is_parsed() {
        let base = serve(
            "500 Internal Server Error",
            r#"{"status": "error", "message": "Falha ao obter dados"}"#,
            Duration::ZERO,
        )
        .await;
        let update = client(&base).request_update().await.unwrap();
        assert!(!update.is_success());
        assert_eq!(update.message.as_deref(), Some("Falha ao obter dados"));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(matches!(decode_snapshot("[]"), Err(FetchError::Malformed(_))));
        assert!(matches!(decode_snapshot("42"), Err(FetchError::Malformed(_))));
        assert!(decode_snapshot("{}").is_ok());
    }
}
