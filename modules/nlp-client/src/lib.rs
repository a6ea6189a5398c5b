//! HTTP client for the character/relationship extraction service.
//!
//! `POST {base}/ingest/url` with `{"bookId", "url"}` returns a node/edge
//! payload whose ids are only meaningful within that response.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use bookrel_common::{BookRelError, GraphExtractor, IngestionPayload};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IngestUrlRequest<'a> {
    book_id: i64,
    url: &'a str,
}

pub struct NlpClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NlpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BookRelError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookRelError::Config(format!("failed to build NLP HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to extract a graph from the text at `url`.
    pub async fn ingest_url(
        &self,
        book_id: i64,
        url: &str,
    ) -> Result<IngestionPayload, BookRelError> {
        let endpoint = format!("{}/ingest/url", self.base_url);
        let upstream = |message: String| BookRelError::Upstream {
            book_id,
            url: url.to_string(),
            message,
        };

        debug!(book_id, url, endpoint = %endpoint, "NLP ingest request");

        let response = self
            .http
            .post(&endpoint)
            .json(&IngestUrlRequest { book_id, url })
            .send()
            .await
            .map_err(|e| self.transport_error(book_id, url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(upstream(format!("NLP service error ({status}): {body}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(book_id, url, e))?;

        serde_json::from_slice(&body).map_err(|e| upstream(format!("malformed response: {e}")))
    }

    fn transport_error(&self, book_id: i64, url: &str, e: reqwest::Error) -> BookRelError {
        if e.is_timeout() {
            BookRelError::UpstreamTimeout {
                book_id,
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            BookRelError::Upstream {
                book_id,
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl GraphExtractor for NlpClient {
    async fn extract(&self, book_id: i64, url: &str) -> Result<IngestionPayload, BookRelError> {
        self.ingest_url(book_id, url).await
    }
}
