//! PDF extractor using lopdf.

use crate::Result;
use crate::core::mime::FormatKind;
use crate::extraction;
use crate::plugins::{DocumentExtractor, Plugin};

/// PDF extractor backed by lopdf content stream decoding.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn description(&self) -> &str {
        "PDF text extraction using lopdf"
    }
}

impl DocumentExtractor for PdfExtractor {
    fn extract_text(&self, content: &[u8]) -> Result<String> {
        extraction::pdf::extract_text(content)
    }

    fn supported_formats(&self) -> &[FormatKind] {
        &[FormatKind::Pdf]
    }
}
