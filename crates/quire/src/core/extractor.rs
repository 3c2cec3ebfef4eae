//! Format dispatch with strategy fallback.
//!
//! [`FormatExtractor`] resolves a [`FormatKind`] from the declared media type and file
//! name, runs the registered [`DocumentExtractor`] for it, and degrades to a lossy
//! UTF-8 decode exactly once when that strategy fails or panics. Parser failures never
//! escape as errors; the only errors are the PDF size ceiling and, under the `reject`
//! policy, unsupported formats.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::core::config::{AnalysisConfig, UnsupportedFormatPolicy};
use crate::core::mime::FormatKind;
use crate::extraction::decode_lossy;
use crate::extractors::default_extractors;
use crate::plugins::DocumentExtractor;
use crate::types::{ExtractionMethod, ExtractionResult};
use crate::{QuireError, Result};

/// Orchestrates extraction strategies for each supported format.
///
/// # Example
///
/// ```rust
/// use quire::core::config::AnalysisConfig;
/// use quire::core::extractor::FormatExtractor;
/// use quire::types::ExtractionMethod;
///
/// let extractor = FormatExtractor::new(&AnalysisConfig::default());
/// let result = extractor.extract(b"Call me Ishmael.", "text/plain", "moby.txt").unwrap();
/// assert_eq!(result.content, "Call me Ishmael.");
/// assert_eq!(result.method, ExtractionMethod::Direct);
/// ```
#[derive(Clone)]
pub struct FormatExtractor {
    extractors: HashMap<FormatKind, Arc<dyn DocumentExtractor>>,
    max_bytes: u64,
    unsupported_formats: UnsupportedFormatPolicy,
}

impl std::fmt::Debug for FormatExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: HashMap<&str, &str> = self
            .extractors
            .iter()
            .map(|(kind, extractor)| (kind.as_str(), extractor.name()))
            .collect();
        f.debug_struct("FormatExtractor")
            .field("extractors", &names)
            .field("max_bytes", &self.max_bytes)
            .field("unsupported_formats", &self.unsupported_formats)
            .finish()
    }
}

impl FormatExtractor {
    /// Create an extractor with the built-in strategies registered.
    pub fn new(config: &AnalysisConfig) -> Self {
        let mut extractor = Self::empty(config);
        for strategy in default_extractors() {
            extractor.register(strategy);
        }
        extractor
    }

    /// Create an extractor with no strategies. Structured formats go straight to fallback.
    pub fn empty(config: &AnalysisConfig) -> Self {
        Self {
            extractors: HashMap::new(),
            max_bytes: config.max_upload_bytes,
            unsupported_formats: config.unsupported_formats,
        }
    }

    /// Register a strategy for each format it supports, replacing any previous one.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) {
        tracing::debug!(
            extractor = extractor.name(),
            description = extractor.description(),
            "Registering document extractor"
        );
        for kind in extractor.supported_formats() {
            if let Some(previous) = self.extractors.insert(*kind, Arc::clone(&extractor)) {
                tracing::debug!(
                    format = %kind,
                    replaced = previous.name(),
                    extractor = extractor.name(),
                    "Replaced document extractor"
                );
            }
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.register(extractor);
        self
    }

    pub fn extractor_for(&self, kind: FormatKind) -> Option<&Arc<dyn DocumentExtractor>> {
        self.extractors.get(&kind)
    }

    /// Formats with a registered strategy, in a stable order.
    pub fn supported_formats(&self) -> Vec<FormatKind> {
        let mut kinds: Vec<FormatKind> = self.extractors.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Extract text from `content`.
    ///
    /// # Errors
    ///
    /// - `QuireError::OversizedInput` for a PDF above the byte ceiling. The PDF
    ///   strategy is never invoked in that case.
    /// - `QuireError::UnsupportedFormat` for an unrecognized type under the `reject` policy.
    pub fn extract(&self, content: &[u8], mime_type: &str, file_name: &str) -> Result<ExtractionResult> {
        let kind = FormatKind::detect(mime_type, file_name);
        tracing::debug!(format = %kind, mime_type, file_name, "Resolved document format");

        let result = match kind {
            FormatKind::Docx => {
                self.extract_structured(kind, content, ExtractionMethod::DocxParsed, ExtractionMethod::DocxFallback)
            }
            FormatKind::Pdf => {
                let size = content.len() as u64;
                if size > self.max_bytes {
                    tracing::warn!(size, limit = self.max_bytes, "PDF exceeds size ceiling, not parsing");
                    return Err(QuireError::OversizedInput {
                        size,
                        limit: self.max_bytes,
                    });
                }
                self.extract_structured(kind, content, ExtractionMethod::PdfParsed, ExtractionMethod::PdfFallback)
            }
            FormatKind::PlainText | FormatKind::Markdown => self.extract_direct(kind, content),
            FormatKind::Unknown => match self.unsupported_formats {
                UnsupportedFormatPolicy::Fallback => ExtractionResult::fallback(
                    decode_lossy(content),
                    ExtractionMethod::GenericFallback,
                    format!("No extractor for media type '{mime_type}'"),
                ),
                UnsupportedFormatPolicy::Reject => {
                    tracing::info!(mime_type, file_name, "Rejecting unsupported format");
                    return Err(QuireError::UnsupportedFormat(format!(
                        "Unsupported file type '{mime_type}'. Supported formats are plain text, Markdown, DOCX and PDF"
                    )));
                }
            },
        };

        tracing::info!(
            method = %result.method,
            success = result.success,
            chars = result.content.len(),
            "Text extraction finished"
        );
        Ok(result)
    }

    fn extract_structured(
        &self,
        kind: FormatKind,
        content: &[u8],
        parsed: ExtractionMethod,
        fallback: ExtractionMethod,
    ) -> ExtractionResult {
        let Some(extractor) = self.extractors.get(&kind) else {
            let reason = format!("No {kind} extractor registered");
            tracing::warn!(format = %kind, "{reason}, using fallback");
            return ExtractionResult::fallback(decode_lossy(content), fallback, reason);
        };

        match run_extractor(extractor.as_ref(), content) {
            Ok(text) => ExtractionResult::parsed(text, parsed),
            Err(error) => {
                tracing::warn!(
                    extractor = extractor.name(),
                    version = %extractor.version(),
                    error = %error,
                    "Structured extraction failed, using fallback"
                );
                ExtractionResult::fallback(decode_lossy(content), fallback, error.to_string())
            }
        }
    }

    fn extract_direct(&self, kind: FormatKind, content: &[u8]) -> ExtractionResult {
        let Some(extractor) = self.extractors.get(&kind) else {
            return ExtractionResult::parsed(decode_lossy(content), ExtractionMethod::Direct);
        };

        match run_extractor(extractor.as_ref(), content) {
            Ok(text) => ExtractionResult::parsed(text, ExtractionMethod::Direct),
            Err(error) => {
                tracing::warn!(extractor = extractor.name(), error = %error, "Text decoding failed, using fallback");
                ExtractionResult::fallback(decode_lossy(content), ExtractionMethod::Direct, error.to_string())
            }
        }
    }
}

/// Run a strategy, converting a panic into `ExtractionFailed`.
fn run_extractor(extractor: &dyn DocumentExtractor, content: &[u8]) -> Result<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_text(content))) {
        Ok(result) => result,
        Err(payload) => Err(QuireError::extraction_failed(format!(
            "{} panicked: {}",
            extractor.name(),
            panic_message(payload.as_ref())
        ))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
