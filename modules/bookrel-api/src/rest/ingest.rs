use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;

use bookrel_common::{BookRelError, IngestSummary};

use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestUrlBody {
    book_id: Option<i64>,
    url: Option<String>,
}

/// Run extraction for a source URL and merge the result into the book's graph.
pub async fn ingest_url(
    State(state): State<Arc<AppState>>,
    body: Result<Json<IngestUrlBody>, JsonRejection>,
) -> Result<Json<IngestSummary>, ApiError> {
    let Json(body) = body?;
    let book_id = body
        .book_id
        .ok_or_else(|| BookRelError::invalid("bookId is required"))?;
    let url = body
        .url
        .ok_or_else(|| BookRelError::invalid("url is required"))?;

    let summary = state.ingest.ingest_url(book_id, &url).await?;
    Ok(Json(summary))
}
