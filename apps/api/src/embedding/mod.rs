//! Sentence embeddings behind a pluggable trait.
//!
//! Default backend: `FastEmbedder` (fastembed / ONNX, all-MiniLM-L6-v2).
//! Offline/test backend: `HashEmbedder` (deterministic feature hashing).
//!
//! `AppState` holds an `Arc<dyn Embedder>`, chosen at startup via config.

mod fast;
mod hashing;
pub mod similarity;

use std::sync::Arc;

pub use fast::FastEmbedder;
pub use hashing::HashEmbedder;
pub use similarity::cosine_similarity;

use anyhow::Result;

use crate::config::{Config, EmbedBackend};
use crate::errors::AppError;

/// The embedder trait. Implement this to swap backends without touching
/// handlers or the matching pipeline.
///
/// Embedding is CPU-bound; callers run it under `spawn_blocking`.
pub trait Embedder: Send + Sync {
    /// Embeds a batch of texts, one vector per input, in order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError>;

    /// Embeds a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut vectors = self.embed_batch(&[text])?;
        vectors.pop().ok_or_else(|| {
            AppError::Embedding("backend returned no vector for input".to_string())
        })
    }

    /// Embedding dimension of this backend.
    fn dimension(&self) -> usize;

    /// Model name/identifier, for logs and responses.
    fn model_name(&self) -> &str;
}

/// Constructs the embedder selected by config. Failure here (e.g. model
/// weights unavailable) aborts startup rather than failing requests later.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match config.embed_backend {
        EmbedBackend::FastEmbed => {
            let embedder = FastEmbedder::new(config.embed_cache_dir.as_deref())?;
            Ok(Arc::new(embedder))
        }
        EmbedBackend::Hash => Ok(Arc::new(HashEmbedder::default())),
    }
}
