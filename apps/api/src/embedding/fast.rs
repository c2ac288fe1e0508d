//! fastembed-backed sentence embeddings (all-MiniLM-L6-v2 via ONNX).

use std::path::Path;

use anyhow::{Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::embedding::Embedder;
use crate::errors::AppError;

const MODEL: EmbeddingModel = EmbeddingModel::AllMiniLML6V2;
/// all-MiniLM-L6-v2 output dimension.
const DIMENSION: usize = 384;

pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    /// Loads the model, downloading weights into `cache_dir` (or the
    /// fastembed default cache) on first use.
    pub fn new(cache_dir: Option<&Path>) -> Result<Self> {
        let mut options = InitOptions::new(MODEL).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options)
            .context("failed to initialize embedding model (are the weights available?)")?;

        Ok(FastEmbedder { model })
    }
}

impl Embedder for FastEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| AppError::Embedding(e.to_string()))
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        "all-MiniLM-L6-v2"
    }
}
