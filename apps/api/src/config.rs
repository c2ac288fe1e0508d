use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which embedding backend to construct at startup.
///
/// `FastEmbed` is the default (real sentence embeddings via ONNX).
/// `Hash` is a deterministic feature-hashing backend for offline use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedBackend {
    FastEmbed,
    Hash,
}

impl EmbedBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "fastembed" => Ok(EmbedBackend::FastEmbed),
            "hash" => Ok(EmbedBackend::Hash),
            other => bail!("EMBED_BACKEND must be 'fastembed' or 'hash', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup never requires a .env file.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embed_backend: EmbedBackend,
    /// Cache directory for downloaded embedding model weights.
    pub embed_cache_dir: Option<PathBuf>,
    pub session_ttl_secs: i64,
    pub max_upload_bytes: usize,
    pub default_top_n: usize,
    pub skill_match_threshold: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            embed_backend: EmbedBackend::parse(&env_or("EMBED_BACKEND", "fastembed"))?,
            embed_cache_dir: std::env::var("EMBED_CACHE_DIR").ok().map(PathBuf::from),
            session_ttl_secs: env_or("SESSION_TTL_SECS", "3600")
                .parse::<i64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            default_top_n: env_or("DEFAULT_TOP_N", "5")
                .parse::<usize>()
                .context("DEFAULT_TOP_N must be a positive integer")?,
            skill_match_threshold: env_or("SKILL_MATCH_THRESHOLD", "0.5")
                .parse::<f32>()
                .context("SKILL_MATCH_THRESHOLD must be a float in [0, 1]")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
