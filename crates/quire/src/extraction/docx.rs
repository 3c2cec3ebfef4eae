//! DOCX (Microsoft Word) text extraction using docx-lite.

use crate::error::{QuireError, Result};

/// Extract text from DOCX bytes using docx-lite.
///
/// # Returns
/// * `Ok(String)` - The extracted text content
/// * `Err(QuireError::Parsing)` - If the archive or document XML is malformed
#[cfg(feature = "office")]
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    docx_lite::extract_text_from_bytes(bytes)
        .map_err(|e| QuireError::parsing(format!("DOCX text extraction failed: {}", e)))
}

#[cfg(not(feature = "office"))]
pub fn extract_text(_bytes: &[u8]) -> Result<String> {
    Err(QuireError::MissingDependency(
        "DOCX extraction requires the 'office' feature".to_string(),
    ))
}
