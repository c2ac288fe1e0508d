//! DOCX text extraction via `docx-rust`.

use std::io::Write;

use anyhow::Context;
use docx_rust::document::{BodyContent, ParagraphContent, RunContent};
use docx_rust::DocxFile;

use crate::errors::AppError;

/// Extracts paragraph text from a .docx file, one line per paragraph.
///
/// `docx-rust` reads from a path, so the upload is spooled through a
/// temp file first.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut tmp = tempfile::NamedTempFile::new()
        .context("failed to create temp file for DOCX extraction")?;
    tmp.write_all(bytes)
        .context("failed to spool DOCX upload to temp file")?;

    let docx = DocxFile::from_file(tmp.path())
        .map_err(|e| AppError::UnprocessableEntity(format!("DOCX open failed: {e:?}")))?;
    let docx = docx
        .parse()
        .map_err(|e| AppError::UnprocessableEntity(format!("DOCX parse failed: {e:?}")))?;

    let mut paragraphs = Vec::new();
    for content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = content {
            let mut line = String::new();
            for pc in &paragraph.content {
                if let ParagraphContent::Run(run) = pc {
                    for rc in &run.content {
                        if let RunContent::Text(text) = rc {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}
