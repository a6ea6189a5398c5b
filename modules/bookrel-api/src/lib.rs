use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use bookrel_graph::{GraphService, IngestPipeline};

pub mod error;
pub mod rest;

pub struct AppState {
    pub graph: GraphService,
    pub ingest: IngestPipeline,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(rest::health))
        .route("/api/graph/seed", post(rest::seed))
        .route("/api/graph/snapshot", get(rest::snapshot))
        .route("/api/graph/{book_id}", get(rest::graph))
        .route("/api/nlp/ingestUrl", post(rest::ingest::ingest_url))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
