//! Built-in document extractors.
//!
//! One plugin per structured format, plus the direct text decoder:
//! - [`DocxExtractor`] - Word documents via docx-lite
//! - [`PdfExtractor`] - PDF via lopdf
//! - [`PlainTextExtractor`] - plain text and Markdown

use std::sync::Arc;

use crate::plugins::DocumentExtractor;

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

/// The default strategy set used by [`FormatExtractor::new`](crate::core::extractor::FormatExtractor::new).
pub fn default_extractors() -> Vec<Arc<dyn DocumentExtractor>> {
    vec![
        Arc::new(PlainTextExtractor::new()),
        Arc::new(DocxExtractor::new()),
        Arc::new(PdfExtractor::new()),
    ]
}
