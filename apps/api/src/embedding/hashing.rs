//! Deterministic feature-hashing embedder.
//!
//! No model weights, no network: tokens are sign-hashed into a fixed-size
//! vector and L2-normalized. Overlapping vocabularies still score high on
//! cosine similarity, which is enough for tests and offline smoke runs.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use crate::embedding::Embedder;
use crate::errors::AppError;

// Fixed seeds keep embeddings stable across processes and Rust versions.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

pub struct HashEmbedder {
    dimension: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        HashEmbedder { dimension: 384 }
    }
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        HashEmbedder {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let idx = self.hash_token(&token);
            // Sign hashing: even hash of "<token>_sign" adds, odd subtracts.
            let sign = if self.hash_token(&format!("{token}_sign")) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

impl Embedder for HashEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "feature-hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::cosine_similarity;

    #[test]
    fn hash_embedder_produces_normalized_vectors() {
        let embedder = HashEmbedder::default();
        let vec = embedder.embed("rust python distributed systems").unwrap();

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "L2 norm should be 1.0, got {norm}");
    }

    #[test]
    fn hash_embedder_is_deterministic() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("Senior Rust Engineer").unwrap();
        let b = embedder.embed("Senior Rust Engineer").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_text_scores_one() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("rust aws kubernetes").unwrap();
        let b = embedder.embed("rust aws kubernetes").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn overlapping_text_beats_disjoint_text() {
        let embedder = HashEmbedder::default();
        let job = embedder.embed("rust aws backend services").unwrap();
        let similar = embedder.embed("rust aws docker backend").unwrap();
        let different = embedder.embed("cobol mainframe oracle forms").unwrap();

        let similar_score = cosine_similarity(&job, &similar);
        let different_score = cosine_similarity(&job, &different);
        assert!(
            similar_score > different_score,
            "overlap should score higher: {similar_score} vs {different_score}"
        );
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("RUST").unwrap();
        let b = embedder.embed("rust").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::default();
        let vec = embedder.embed("").unwrap();
        assert!(vec.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn dimension_is_configurable() {
        let embedder = HashEmbedder::new(64);
        assert_eq!(embedder.dimension(), 64);
        assert_eq!(embedder.embed("rust").unwrap().len(), 64);
    }
}
