use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable embedding backend. Default: fastembed. Swap via EMBED_BACKEND env.
    pub embedder: Arc<dyn Embedder>,
    pub sessions: SessionStore,
}
