//! Uploaded document model: raw text, contact fields, and the embedding
//! computed once at upload time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Supported upload formats, inferred from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }
}

/// Contact fields extracted from resume text. Absent fields stay `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// An uploaded document with its extracted text and embedding.
///
/// Invariant: `embedding` is computed exactly once, from `text`, at upload.
/// Documents live only inside their session and are dropped with it.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub filename: String,
    pub format: DocumentFormat,
    pub text: String,
    pub contact: ContactInfo,
    pub clients: Vec<String>,
    pub embedding: Vec<f32>,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Display name: extracted contact name, falling back to the filename
    /// stem with `_` and `-` mapped to spaces.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.contact.name {
            return name.clone();
        }
        filename_stem(&self.filename)
    }
}

/// Strips the extension and maps `_`/`-` to spaces.
pub fn filename_stem(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);
    stem.replace(['_', '-'], " ").trim().to_string()
}

/// Wire representation of a stored document (text omitted).
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub display_name: String,
    pub format: DocumentFormat,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub text_chars: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        DocumentSummary {
            id: doc.id,
            filename: doc.filename.clone(),
            display_name: doc.display_name(),
            format: doc.format,
            email: doc.contact.email.clone(),
            phone: doc.contact.phone.clone(),
            text_chars: doc.text.chars().count(),
            uploaded_at: doc.uploaded_at,
        }
    }
}
