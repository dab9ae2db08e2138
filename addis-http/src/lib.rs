//! Minimal HTTP fetcher for raw bytes.
//!
//! The image pipeline only ever issues plain GETs against absolute CDN
//! URLs, so this client is deliberately small: one request per call, a
//! per-client timeout, and a strict status policy where only `200 OK`
//! counts as success. There is no retry machinery; a failed fetch is the
//! caller's problem to drop or report.
//!
//! Observability: structured `tracing` events are emitted for request
//! start (`http.request.start`), completed responses (`http.response`)
//! and terminal failures (`http.error`). Error bodies are logged as a
//! truncated snippet, never in full.

use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status}: {body_snippet}")]
    Status {
        status: StatusCode,
        body_snippet: String,
    },
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client with a 5s connect timeout and a 30s overall
    /// request timeout.
    ///
    /// ```no_run
    /// use addis_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new()?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(30));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(30),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET an absolute URL and return the raw response body.
    ///
    /// Succeeds only on HTTP `200 OK`. Anything else — other 2xx codes
    /// included — is reported as [`HttpError::Status`].
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;

        tracing::debug!(
            host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms = self.default_timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = self
            .inner
            .get(url)
            .timeout(self.default_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(message = %e, "http.error");
                HttpError::Network(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            tracing::warn!(message = %e, "http.error");
            HttpError::Network(e.to_string())
        })?;

        tracing::debug!(
            %status,
            duration_ms = t0.elapsed().as_millis() as u64,
            body_len = body.len(),
            "http.response"
        );

        if status != StatusCode::OK {
            return Err(HttpError::Status {
                status,
                body_snippet: snip_body(&body),
            });
        }
        Ok(body)
    }
}

fn snip_body(body: &[u8]) -> String {
    let snip = String::from_utf8_lossy(body);
    // Cut on a char boundary; error bodies are routinely multi-byte text.
    match snip.char_indices().nth(500) {
        Some((idx, _)) => format!("{}...", &snip[..idx]),
        None => snip.into_owned(),
    }
}
