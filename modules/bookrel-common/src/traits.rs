use async_trait::async_trait;

use crate::{BookRelError, IngestionPayload};

/// External character/relationship extractor.
///
/// Given a book and a source URL, returns the complete node/edge payload or
/// fails. There are no partial results.
#[async_trait]
pub trait GraphExtractor: Send + Sync {
    async fn extract(&self, book_id: i64, url: &str) -> Result<IngestionPayload, BookRelError>;
}
