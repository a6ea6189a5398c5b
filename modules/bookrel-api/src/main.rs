use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bookrel_common::Config;
use bookrel_graph::{migrate::migrate, GraphClient, GraphService, GraphStore, IngestPipeline, Neo4jStore};
use bookrel_api::{build_router, AppState};
use nlp_client::NlpClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bookrel=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let client =
        GraphClient::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
            .await?;

    match client.server_version().await {
        Ok(version) => info!(version = %version, "Connected to Neo4j"),
        Err(e) => warn!(error = %e, "Connected to Neo4j, version unavailable"),
    }

    migrate(&client).await?;

    let store: Arc<dyn GraphStore> = Arc::new(Neo4jStore::new(client));
    let timeout = Duration::from_secs(config.nlp_timeout_secs);
    let nlp = Arc::new(NlpClient::new(&config.nlp_base_url, timeout)?);
    info!(base_url = nlp.base_url(), timeout_secs = config.nlp_timeout_secs, "NLP client ready");

    let state = Arc::new(AppState {
        graph: GraphService::new(store.clone()),
        ingest: IngestPipeline::new(nlp, store, timeout),
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Book relationship API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
