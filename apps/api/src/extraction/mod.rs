//! Text extraction from uploaded documents.
//!
//! PDF goes through `pdf-extract`, DOCX through `docx-rust`, TXT through a
//! lossy UTF-8 decode. Extraction never panics on malformed input; failures
//! come back as `UnprocessableEntity` so callers can skip the file.

pub mod contact;
mod docx;

use crate::errors::AppError;
use crate::models::document::DocumentFormat;

/// Extracts raw text from an uploaded file.
///
/// Empty or whitespace-only output is an error: a document the parser
/// accepted but that carries no text cannot be scored.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, AppError> {
    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction failed: {e}")))?,
        DocumentFormat::Docx => docx::extract_docx_text(bytes)?,
        DocumentFormat::Txt => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "document contains no extractable text".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_bytes_decode_to_text() {
        let text = extract_text(DocumentFormat::Txt, b"Senior Rust Engineer").unwrap();
        assert_eq!(text, "Senior Rust Engineer");
    }

    #[test]
    fn test_whitespace_only_txt_is_unprocessable() {
        let err = extract_text(DocumentFormat::Txt, b"  \n\t ").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_corrupted_pdf_is_an_error_not_a_panic() {
        let err = extract_text(DocumentFormat::Pdf, b"not a pdf at all").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_corrupted_docx_is_an_error_not_a_panic() {
        let err = extract_text(DocumentFormat::Docx, b"not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_invalid_utf8_txt_is_decoded_lossily() {
        let text = extract_text(DocumentFormat::Txt, &[0x52, 0x75, 0x73, 0x74, 0xFF]).unwrap();
        assert!(text.starts_with("Rust"));
    }
}
