//! Ranks resumes against a job description by cosine similarity of their
//! stored embeddings. Pure vector math; embeddings were computed at upload.

use std::cmp::Ordering;

use crate::embedding::cosine_similarity;
use crate::models::document::Document;
use crate::models::matching::MatchResult;

/// Scores every resume against the job description and returns the top `n`
/// in non-increasing score order. The sort is stable, so ties keep upload
/// order.
pub fn rank_resumes(job: &Document, resumes: &[Document], top_n: usize) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = resumes
        .iter()
        .map(|doc| MatchResult::from_document(doc, cosine_similarity(&job.embedding, &doc.embedding)))
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(top_n);
    results
}
