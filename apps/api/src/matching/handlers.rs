//! Axum route handlers for the match and skill-filter endpoints.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart::render_score_chart;
use crate::errors::AppError;
use crate::matching::ranker::rank_resumes;
use crate::matching::skills::filter_by_skills;
use crate::models::document::Document;
use crate::models::matching::{MatchResult, SkillFilterResult, SkippedFile};
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    /// Files that failed ingestion earlier in this session. They never
    /// enter the ranking; listing them here keeps the batch auditable.
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub skills: Vec<String>,
    pub min_threshold: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub results: Vec<SkillFilterResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/match
///
/// Ranks the session's resumes against its job description. Requires a job
/// description; an empty resume list yields an empty ranking.
pub async fn handle_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<MatchRequest>>,
) -> Result<Json<MatchResponse>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    let top_n = request
        .and_then(|Json(r)| r.top_n)
        .unwrap_or(state.config.default_top_n);

    let results = ranked_results(&state, &session, top_n)?;
    Ok(Json(MatchResponse {
        results,
        skipped: session.skipped,
    }))
}

/// GET /api/v1/sessions/:id/match/chart?top_n=
///
/// The same ranking as POST .../match, rendered as an SVG bar chart.
pub async fn handle_match_chart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ChartParams>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.snapshot(id).await?;
    let top_n = params.top_n.unwrap_or(state.config.default_top_n);

    let results = ranked_results(&state, &session, top_n)?;
    let svg = render_score_chart(&results)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// POST /api/v1/sessions/:id/filter
///
/// Filters the session's resumes by the requested skills. Embedding the
/// mined phrases is CPU-bound, so the filter runs under `spawn_blocking`.
pub async fn handle_filter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let skills: Vec<String> = request
        .skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return Err(AppError::Validation(
            "at least one non-empty skill is required".to_string(),
        ));
    }

    let threshold = request
        .min_threshold
        .unwrap_or(state.config.skill_match_threshold)
        .clamp(-1.0, 1.0);

    let session = state.sessions.snapshot(id).await?;
    let resumes: Vec<Document> = session.resumes;
    let embedder = state.embedder.clone();

    let results = tokio::task::spawn_blocking(move || {
        filter_by_skills(&resumes, &skills, threshold, embedder.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("filter task failed: {e}")))??;

    Ok(Json(FilterResponse { results }))
}

fn ranked_results(
    state: &AppState,
    session: &Session,
    top_n: usize,
) -> Result<Vec<MatchResult>, AppError> {
    let job = session.job.as_ref().ok_or_else(|| {
        AppError::Validation("upload a job description before matching".to_string())
    })?;

    let results = rank_resumes(job, &session.resumes, top_n.max(1));
    tracing::info!(
        session_id = %session.id,
        resumes = session.resumes.len(),
        returned = results.len(),
        model = state.embedder.model_name(),
        "match computed"
    );
    Ok(results)
}
