//! PDF text extraction using lopdf.
//!
//! Text is pulled from each page's content stream in page order. Encrypted documents
//! are refused rather than decrypted.

use crate::error::{QuireError, Result};

/// Extract text from every page of a PDF.
///
/// # Errors
/// * `QuireError::Parsing` - If the PDF is malformed, encrypted, or has no pages
#[cfg(feature = "pdf")]
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| QuireError::parsing(format!("Invalid PDF: {}", e)))?;

    if document.is_encrypted() {
        return Err(QuireError::parsing("PDF is password-protected"));
    }

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(QuireError::parsing("PDF has no pages"));
    }

    tracing::debug!(pages = page_numbers.len(), "Extracting PDF text");

    document
        .extract_text(&page_numbers)
        .map_err(|e| QuireError::parsing(format!("PDF text extraction failed: {}", e)))
}

#[cfg(not(feature = "pdf"))]
pub fn extract_text(_bytes: &[u8]) -> Result<String> {
    Err(QuireError::MissingDependency(
        "PDF extraction requires the 'pdf' feature".to_string(),
    ))
}

#[cfg(all(test, feature = "pdf"))]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_invalid_pdf() {
        let err = extract_text(b"%PDF-1.4 but nothing else").unwrap_err();
        assert!(matches!(err, QuireError::Parsing { .. }));
    }

    #[test]
    fn test_extract_text_not_a_pdf() {
        assert!(extract_text(b"Hello world").is_err());
    }
}
