//! Axum route handlers for session and upload endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::{build_document, build_text_document};
use crate::models::document::DocumentSummary;
use crate::models::matching::SkippedFile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UploadJobResponse {
    pub job: DocumentSummary,
}

#[derive(Debug, Serialize)]
pub struct UploadResumesResponse {
    pub accepted: Vec<DocumentSummary>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub job: Option<DocumentSummary>,
    pub resumes: Vec<DocumentSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create().await;
    Json(CreateSessionResponse { session_id })
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/job
///
/// Multipart with either a `file` part (PDF/DOCX/TXT) or a `text` part with
/// the raw job description. Replaces any previously stored job description.
pub async fn handle_upload_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadJobResponse>, AppError> {
    // Session must exist before we bother parsing the body.
    state.sessions.snapshot(id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let part_name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        let document = match (part_name.as_deref(), file_name) {
            (Some("text"), _) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid text field: {e}")))?;
                build_text_document(state.embedder.clone(), text).await?
            }
            (_, Some(filename)) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid file field: {e}")))?;
                build_document(
                    state.embedder.clone(),
                    state.config.max_upload_bytes,
                    filename,
                    bytes,
                )
                .await?
            }
            _ => continue,
        };

        let summary = DocumentSummary::from(&document);
        state.sessions.set_job(id, document).await?;
        return Ok(Json(UploadJobResponse { job: summary }));
    }

    Err(AppError::Validation(
        "expected a 'file' or 'text' multipart part".to_string(),
    ))
}

/// POST /api/v1/sessions/:id/resumes
///
/// Multipart with any number of file parts. Per-file failures are reported
/// in `skipped`; they never fail the batch.
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumesResponse>, AppError> {
    state.sessions.snapshot(id).await?;

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue; // non-file parts are ignored
        };

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                skipped.push(SkippedFile {
                    filename,
                    reason: format!("failed to read upload: {e}"),
                });
                continue;
            }
        };

        match build_document(
            state.embedder.clone(),
            state.config.max_upload_bytes,
            filename.clone(),
            bytes,
        )
        .await
        {
            Ok(document) => documents.push(document),
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "skipping resume");
                skipped.push(SkippedFile {
                    filename,
                    reason: e.to_string(),
                });
            }
        }
    }

    if documents.is_empty() && skipped.is_empty() {
        return Err(AppError::Validation(
            "no resume files found in the upload".to_string(),
        ));
    }

    let accepted: Vec<DocumentSummary> = documents.iter().map(DocumentSummary::from).collect();
    state
        .sessions
        .add_resumes(id, documents, skipped.clone())
        .await?;

    Ok(Json(UploadResumesResponse { accepted, skipped }))
}

/// GET /api/v1/sessions/:id/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListDocumentsResponse>, AppError> {
    let session = state.sessions.snapshot(id).await?;

    Ok(Json(ListDocumentsResponse {
        job: session.job.as_ref().map(DocumentSummary::from),
        resumes: session.resumes.iter().map(DocumentSummary::from).collect(),
    }))
}
