//! Result types returned by the match and skill-filter endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::models::document::Document;

/// One ranked resume. `score` is raw cosine similarity in [-1, 1].
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub document_id: Uuid,
    pub filename: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: f32,
    pub clients: Vec<String>,
}

impl MatchResult {
    pub fn from_document(doc: &Document, score: f32) -> Self {
        MatchResult {
            document_id: doc.id,
            filename: doc.filename.clone(),
            name: doc.display_name(),
            email: doc.contact.email.clone(),
            phone: doc.contact.phone.clone(),
            score,
            clients: doc.clients.clone(),
        }
    }
}

/// One resume that passed the skill filter. `match_score` is the mean of
/// the best per-skill similarities over the matched skills.
#[derive(Debug, Clone, Serialize)]
pub struct SkillFilterResult {
    pub document_id: Uuid,
    pub filename: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub match_score: f32,
    pub matched_skills: Vec<String>,
    pub clients: Vec<String>,
}

/// A file that could not be processed. Reported alongside results rather
/// than failing the batch.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}
