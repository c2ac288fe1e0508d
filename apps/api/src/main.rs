mod chart;
mod config;
mod embedding;
mod errors;
mod extraction;
mod ingest;
mod matching;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::build_embedder;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the embedding backend. Model weight problems surface here,
    // at startup, never mid-request.
    let embedder = build_embedder(&config)?;
    info!(
        "Embedder initialized (model: {}, dimension: {})",
        embedder.model_name(),
        embedder.dimension()
    );

    let sessions = SessionStore::new(config.session_ttl_secs);

    let state = AppState {
        config: config.clone(),
        embedder,
        sessions,
    };

    let app = build_router(state)
        // Whole-body limit leaves headroom for multi-file batches; the
        // per-file limit is enforced in ingestion.
        .layer(DefaultBodyLimit::max(config.max_upload_bytes.saturating_mul(4)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
