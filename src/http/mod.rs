//! HTTP surface: `GET /health`, `POST /upload`, `POST /query`.

pub mod error;
pub mod routes;

use crate::LegalEase;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Uploads larger than this are rejected before extraction.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn router(app: Arc<LegalEase>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/upload", post(routes::upload))
        .route("/query", post(routes::query))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

pub async fn serve(app: Arc<LegalEase>, bind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on http://{bind}");

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
