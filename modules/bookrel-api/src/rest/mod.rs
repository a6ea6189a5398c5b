pub mod ingest;

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use serde::Deserialize;

use bookrel_common::{BookRelError, GraphView};
use bookrel_graph::service::SAMPLE_BOOK_ID;

use crate::error::ApiError;
use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQuery {
    from_chapter: Option<i64>,
    to_chapter: Option<i64>,
    min_weight: Option<f64>,
    limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQuery {
    book_id: Option<i64>,
    progress: Option<f64>,
    total_chapters: Option<i64>,
    window: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedQuery {
    book_id: Option<i64>,
}

// --- Handlers ---

pub async fn health() -> &'static str {
    "OK"
}

pub async fn seed(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SeedQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(params) = params?;
    let status = state
        .graph
        .seed(params.book_id.unwrap_or(SAMPLE_BOOK_ID))
        .await?;
    Ok(Json(serde_json::json!({ "status": status })))
}

pub async fn graph(
    State(state): State<Arc<AppState>>,
    book_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<Json<GraphView>, ApiError> {
    let Path(book_id) = book_id?;
    let Query(params) = params?;
    let view = state
        .graph
        .get_graph(
            book_id,
            params.from_chapter,
            params.to_chapter,
            params.min_weight,
            params.limit,
        )
        .await?;
    Ok(Json(view))
}

pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SnapshotQuery>, QueryRejection>,
) -> Result<Json<GraphView>, ApiError> {
    let Query(params) = params?;
    let book_id = params
        .book_id
        .ok_or_else(|| BookRelError::invalid("bookId is required"))?;
    let total = params
        .total_chapters
        .ok_or_else(|| BookRelError::invalid("totalChapters is required"))?;

    let view = state
        .graph
        .snapshot(book_id, params.progress, total, params.window)
        .await?;
    Ok(Json(view))
}
