//! Plain text and Markdown extractor.

use crate::Result;
use crate::core::mime::FormatKind;
use crate::extraction::decode_lossy;
use crate::plugins::{DocumentExtractor, Plugin};

/// Decodes plain text and Markdown directly. Never fails.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn description(&self) -> &str {
        "Lossy UTF-8 decoding for plain text and Markdown"
    }
}

impl DocumentExtractor for PlainTextExtractor {
    fn extract_text(&self, content: &[u8]) -> Result<String> {
        Ok(decode_lossy(content))
    }

    fn supported_formats(&self) -> &[FormatKind] {
        &[FormatKind::PlainText, FormatKind::Markdown]
    }
}
