//! DOCX extractor using docx-lite.
//!
//! Supports: Microsoft Word (.docx)

use crate::Result;
use crate::core::mime::FormatKind;
use crate::extraction;
use crate::plugins::{DocumentExtractor, Plugin};

/// DOCX extractor backed by docx-lite's streaming XML parser.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn description(&self) -> &str {
        "DOCX text extraction using docx-lite"
    }
}

impl DocumentExtractor for DocxExtractor {
    fn extract_text(&self, content: &[u8]) -> Result<String> {
        extraction::docx::extract_text(content)
    }

    fn supported_formats(&self) -> &[FormatKind] {
        &[FormatKind::Docx]
    }
}
