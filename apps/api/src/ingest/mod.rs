//! Upload ingestion: turns raw upload bytes into stored `Document`s.

pub mod handlers;

use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::extraction::contact::{extract_clients, extract_contact_info};
use crate::extraction::extract_text;
use crate::models::document::{Document, DocumentFormat};

/// Builds a `Document` from an upload: size check, format inference, text
/// extraction, contact mining, and the one-time embedding.
///
/// Extraction and embedding are CPU-bound and run under `spawn_blocking`.
pub async fn build_document(
    embedder: Arc<dyn Embedder>,
    max_upload_bytes: usize,
    filename: String,
    bytes: Bytes,
) -> Result<Document, AppError> {
    if bytes.len() > max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "'{filename}' is {} bytes; limit is {max_upload_bytes}",
            bytes.len()
        )));
    }

    let format = DocumentFormat::from_filename(&filename).ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "'{filename}' has an unsupported extension (expected .pdf, .docx, or .txt)"
        ))
    })?;

    let document = tokio::task::spawn_blocking(move || {
        let text = extract_text(format, &bytes)?;
        let contact = extract_contact_info(&text);
        let clients = extract_clients(&text);
        let embedding = embedder.embed(&text)?;

        Ok::<Document, AppError>(Document {
            id: Uuid::new_v4(),
            filename,
            format,
            text,
            contact,
            clients,
            embedding,
            uploaded_at: Utc::now(),
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("ingestion task failed: {e}")))??;

    tracing::info!(
        document_id = %document.id,
        filename = %document.filename,
        chars = document.text.chars().count(),
        "document ingested"
    );

    Ok(document)
}

/// Builds a `Document` directly from pasted job-description text.
pub async fn build_text_document(
    embedder: Arc<dyn Embedder>,
    text: String,
) -> Result<Document, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "job description text cannot be empty".to_string(),
        ));
    }
    build_document(
        embedder,
        usize::MAX,
        "job_description.txt".to_string(),
        Bytes::from(text.into_bytes()),
    )
    .await
}
