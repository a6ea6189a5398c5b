//! Ingest-from-URL: extractor call, then merge.
//!
//! The extractor is the only fallible precondition. Nothing is written to
//! the store unless it returns a complete payload within the timeout.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use bookrel_common::{require_book_id, BookRelError, GraphExtractor, IngestSummary};

use crate::ingest;
use crate::store::GraphStore;

pub struct IngestPipeline {
    extractor: Arc<dyn GraphExtractor>,
    store: Arc<dyn GraphStore>,
    timeout: Duration,
}

impl IngestPipeline {
    pub fn new(
        extractor: Arc<dyn GraphExtractor>,
        store: Arc<dyn GraphStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            store,
            timeout,
        }
    }

    pub async fn ingest_url(&self, book_id: i64, url: &str) -> Result<IngestSummary, BookRelError> {
        require_book_id(book_id)?;
        let url = url.trim();
        if url.is_empty() {
            return Err(BookRelError::invalid("url is required"));
        }

        info!(book_id, url, "Requesting extraction");

        let payload = match tokio::time::timeout(self.timeout, self.extractor.extract(book_id, url))
            .await
        {
            Ok(Ok(payload)) => payload,
            Ok(Err(e)) => {
                warn!(book_id, url, error = %e, "Extraction failed, nothing written");
                return Err(e);
            }
            Err(_) => {
                warn!(book_id, url, "Extraction timed out, nothing written");
                return Err(BookRelError::UpstreamTimeout {
                    book_id,
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if payload.nodes.is_none() {
            return Err(BookRelError::Upstream {
                book_id,
                url: url.to_string(),
                message: "response has no node list".to_string(),
            });
        }

        ingest::ingest(self.store.as_ref(), book_id, &payload).await
    }
}
