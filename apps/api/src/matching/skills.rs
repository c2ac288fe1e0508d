//! Skill filtering: embeds each requested skill against candidate skill
//! phrases mined from the resume text and keeps resumes whose best phrase
//! clears the similarity threshold.

use crate::embedding::{cosine_similarity, Embedder};
use crate::errors::AppError;
use crate::models::document::Document;
use crate::models::matching::SkillFilterResult;

/// Words that mark a sentence as likely to describe skills.
const SKILL_SIGNAL_WORDS: [&str; 7] = [
    "experience",
    "proficient",
    "skill",
    "technology",
    "framework",
    "language",
    "tool",
];

/// Only the head of the document is mined; resume skill sections sit early
/// and huge appendices drown the phrase list.
const PHRASE_SCAN_CHARS: usize = 20_000;
const MAX_PHRASES: usize = 512;

/// Mines candidate skill phrases: non-empty lines, their comma-separated
/// fragments, and sentences containing a skill-signal word.
pub fn candidate_phrases(text: &str) -> Vec<String> {
    let head: String = text.chars().take(PHRASE_SCAN_CHARS).collect();

    let mut phrases: Vec<String> = Vec::new();
    let mut push = |phrase: &str| {
        let phrase = phrase.trim();
        if phrase.len() >= 2 && !phrases.iter().any(|p| p == phrase) {
            phrases.push(phrase.to_string());
        }
    };

    for line in head.lines() {
        push(line);
        if line.contains(',') {
            for fragment in line.split(',') {
                push(fragment);
            }
        }
    }

    for sentence in head.split(['.', '!', '?']) {
        let lower = sentence.to_lowercase();
        if SKILL_SIGNAL_WORDS.iter().any(|w| lower.contains(w)) {
            push(&sentence.replace('\n', " "));
        }
    }

    phrases.truncate(MAX_PHRASES);
    phrases
}

/// Filters resumes by the requested skills.
///
/// A skill matches a resume when its best cosine similarity against the
/// resume's candidate phrases reaches `threshold`. A resume qualifies when
/// at least one skill matches; its `match_score` is the mean of the matched
/// best-similarities. Results come back sorted by `match_score` descending.
pub fn filter_by_skills(
    resumes: &[Document],
    skills: &[String],
    threshold: f32,
    embedder: &dyn Embedder,
) -> Result<Vec<SkillFilterResult>, AppError> {
    let skill_refs: Vec<&str> = skills.iter().map(String::as_str).collect();
    let skill_vectors = embedder.embed_batch(&skill_refs)?;

    let mut results = Vec::new();

    for doc in resumes {
        let phrases = candidate_phrases(&doc.text);
        if phrases.is_empty() {
            continue;
        }
        let phrase_refs: Vec<&str> = phrases.iter().map(String::as_str).collect();
        let phrase_vectors = embedder.embed_batch(&phrase_refs)?;

        let mut matched_skills = Vec::new();
        let mut match_scores = Vec::new();

        for (skill, skill_vec) in skills.iter().zip(&skill_vectors) {
            let best = phrase_vectors
                .iter()
                .map(|pv| cosine_similarity(skill_vec, pv))
                .fold(f32::MIN, f32::max);

            if best >= threshold {
                matched_skills.push(skill.clone());
                match_scores.push(best);
            }
        }

        if matched_skills.is_empty() {
            continue;
        }

        let match_score = match_scores.iter().sum::<f32>() / match_scores.len() as f32;
        results.push(SkillFilterResult {
            document_id: doc.id,
            filename: doc.filename.clone(),
            name: doc.display_name(),
            email: doc.contact.email.clone(),
            phone: doc.contact.phone.clone(),
            match_score,
            matched_skills,
            clients: doc.clients.clone(),
        });
    }

    results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;
    use crate::models::document::{ContactInfo, DocumentFormat};
    use chrono::Utc;
    use uuid::Uuid;

    fn doc_with_text(filename: &str, text: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            format: DocumentFormat::Txt,
            text: text.to_string(),
            contact: ContactInfo::default(),
            clients: vec![],
            embedding: vec![],
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_candidate_phrases_include_lines_and_fragments() {
        let phrases = candidate_phrases("Skills: Rust, Python, AWS\nBackend services");
        assert!(phrases.iter().any(|p| p == "Rust"));
        assert!(phrases.iter().any(|p| p == "Python"));
        assert!(phrases.iter().any(|p| p == "Backend services"));
    }

    #[test]
    fn test_candidate_phrases_pick_up_signal_sentences() {
        let phrases =
            candidate_phrases("Intro line. Five years of experience with Kafka pipelines. Bye.");
        assert!(phrases
            .iter()
            .any(|p| p.contains("experience with Kafka pipelines")));
    }

    #[test]
    fn test_candidate_phrases_dedup() {
        let phrases = candidate_phrases("Rust\nRust\nRust");
        assert_eq!(phrases.iter().filter(|p| p.as_str() == "Rust").count(), 1);
    }

    #[test]
    fn test_skill_present_in_resume_matches() {
        let embedder = HashEmbedder::default();
        let resumes = vec![doc_with_text(
            "dev.txt",
            "Skills: Rust, Kubernetes\nExtensive backend experience",
        )];
        let skills = vec!["Rust".to_string()];

        let results = filter_by_skills(&resumes, &skills, 0.5, &embedder).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_skills, vec!["Rust".to_string()]);
        assert!(results[0].match_score >= 0.5);
    }

    #[test]
    fn test_skill_absent_from_all_resumes_yields_empty_set() {
        let embedder = HashEmbedder::default();
        let resumes = vec![
            doc_with_text("a.txt", "Skills: Python, Django"),
            doc_with_text("b.txt", "Skills: Java, Spring"),
        ];
        let skills = vec!["Fortran".to_string()];

        let results = filter_by_skills(&resumes, &skills, 0.5, &embedder).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_results_sorted_by_match_score() {
        let embedder = HashEmbedder::default();
        let resumes = vec![
            doc_with_text("partial.txt", "Skills: Rust and some other stack items"),
            doc_with_text("exact.txt", "Rust"),
        ];
        let skills = vec!["Rust".to_string()];

        let results = filter_by_skills(&resumes, &skills, 0.3, &embedder).unwrap();
        assert!(!results.is_empty());
        for pair in results.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_unmatched_skills_are_not_listed() {
        let embedder = HashEmbedder::default();
        let resumes = vec![doc_with_text("dev.txt", "Skills: Rust")];
        let skills = vec!["Rust".to_string(), "Fortran".to_string()];

        let results = filter_by_skills(&resumes, &skills, 0.5, &embedder).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_skills, vec!["Rust".to_string()]);
    }
}
