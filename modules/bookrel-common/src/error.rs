use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookRelError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("NLP extraction failed for book {book_id} ({url}): {message}")]
    Upstream {
        book_id: i64,
        url: String,
        message: String,
    },

    #[error("NLP extraction timed out after {secs}s for book {book_id} ({url})")]
    UpstreamTimeout { book_id: i64, url: String, secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl BookRelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        BookRelError::InvalidArgument(msg.into())
    }

    /// True for upstream failures that may succeed on a later attempt.
    /// Ingestion is idempotent, so retrying these is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookRelError::Upstream { .. } | BookRelError::UpstreamTimeout { .. }
        )
    }
}

/// Reject book ids outside the partition key range.
pub fn require_book_id(book_id: i64) -> Result<(), BookRelError> {
    if book_id < 1 {
        return Err(BookRelError::invalid(format!(
            "bookId must be >= 1, got {book_id}"
        )));
    }
    Ok(())
}
