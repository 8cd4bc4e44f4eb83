//! HTTP server setup and routing.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::ingest;
use crate::routes::{self, AppState};

/// Build the application router over the loaded graph.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/statistics", get(routes::statistics))
        .route("/api/rankings", get(routes::rankings))
        .route("/api/degree-distribution", get(routes::degree_distribution))
        .route("/api/degree-distribution/{label}", get(routes::label_degree_distribution))
        .route("/api/communities", get(routes::communities))
        .route("/api/labels", get(routes::label_population))
        .route("/api/labels/clustering", get(routes::label_clustering))
        .route("/api/labels/degrees", get(routes::label_degrees))
        .route("/api/epidemic/sis", get(routes::epidemic_sis))
        .route("/api/epidemic/sir", get(routes::epidemic_sir))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Load the dataset and serve the analytics API.
pub async fn run(nodes: &Path, edges: &Path, host: &str, port: u16) -> Result<()> {
    let graph = ingest::load_graph(nodes, edges)?;
    info!(nodes = graph.node_count(), edges = graph.edge_count(), "dataset loaded");

    let app = router(AppState { graph: Arc::new(graph) });

    let addr = format!("{host}:{port}");
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
