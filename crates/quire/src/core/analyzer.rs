//! Manuscript analysis entry point.
//!
//! [`ManuscriptAnalyzer`] is the single place where an upload becomes either a
//! [`ManuscriptAnalysis`] or an [`AnalysisError`]. Steps run in a fixed order:
//!
//! 1. No file: `MissingInput`
//! 2. Declared or actual size above the ceiling: `OversizedInput`
//! 3. Zero bytes: `EmptyInput`
//! 4. Format extraction inside a panic guard
//! 5. Blank or too-short text: `EmptyInput`
//! 6. No countable words: `NoReadableWords`
//! 7. Classification and reading time

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::classify::{assess, format_reading_time};
use crate::core::config::AnalysisConfig;
use crate::core::extractor::{FormatExtractor, panic_message};
use crate::core::mime::{FormatKind, sniff_mismatch};
use crate::text::text_statistics;
use crate::types::{AnalysisError, ExtractionResult, ManuscriptAnalysis, UploadedFile};
use crate::{QuireError, Result};

/// Analysis output together with the text it was computed from.
#[derive(Debug, Clone)]
pub struct AnalysisWithText {
    pub analysis: ManuscriptAnalysis,
    pub extracted_text: String,
}

/// Validates uploads, extracts text, counts words and classifies the manuscript.
///
/// Holds no per-request state, so a single instance can be shared across threads.
///
/// # Example
///
/// ```rust
/// use quire::{ManuscriptAnalyzer, ManuscriptCategory, UploadedFile};
///
/// let analyzer = ManuscriptAnalyzer::default();
/// let file = UploadedFile::new(b"Hello world, this is a test.".to_vec(), "text/plain", "test.txt");
///
/// let analysis = analyzer.analyze(Some(&file)).unwrap();
/// assert_eq!(analysis.word_count, 6);
/// assert_eq!(analysis.category, ManuscriptCategory::ShortPiece);
/// ```
#[derive(Debug, Clone)]
pub struct ManuscriptAnalyzer {
    config: Arc<AnalysisConfig>,
    extractor: FormatExtractor,
}

impl Default for ManuscriptAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl ManuscriptAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let extractor = FormatExtractor::new(&config);
        Self {
            config: Arc::new(config),
            extractor,
        }
    }

    /// Use a custom format extractor, e.g. one with substituted strategies.
    pub fn with_extractor(config: AnalysisConfig, extractor: FormatExtractor) -> Self {
        Self {
            config: Arc::new(config),
            extractor,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FormatExtractor {
        &self.extractor
    }

    /// Analyze an upload.
    pub fn analyze(&self, file: Option<&UploadedFile>) -> std::result::Result<ManuscriptAnalysis, AnalysisError> {
        self.analyze_with_text(file).map(|output| output.analysis)
    }

    /// Analyze an upload and also return the extracted text.
    pub fn analyze_with_text(&self, file: Option<&UploadedFile>) -> std::result::Result<AnalysisWithText, AnalysisError> {
        let Some(file) = file else {
            tracing::info!("Analysis requested without a file");
            return Err(AnalysisError::from_error(
                &QuireError::MissingInput("No file was provided".to_string()),
                None,
            ));
        };

        let info = file.info();
        tracing::info!(
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            size = info.file_size,
            "Analyzing manuscript"
        );

        self.run(file).map_err(|error| {
            tracing::info!(
                file_name = %file.file_name,
                error_kind = %error.kind(),
                reason = %error,
                "Manuscript analysis failed"
            );
            AnalysisError::from_error(&error, Some(info))
        })
    }

    fn run(&self, file: &UploadedFile) -> Result<AnalysisWithText> {
        let limit = self.config.max_upload_bytes;
        let actual_size = file.content.len() as u64;
        let size = file.declared_size.max(actual_size);
        if size > limit {
            return Err(QuireError::OversizedInput { size, limit });
        }

        if file.content.is_empty() {
            return Err(QuireError::EmptyInput("The uploaded file is empty".to_string()));
        }

        let kind = FormatKind::detect(&file.mime_type, &file.file_name);
        if let Some(sniffed) = sniff_mismatch(kind, &file.content) {
            tracing::warn!(
                declared = %file.mime_type,
                format = %kind,
                sniffed,
                "Declared type disagrees with file content"
            );
        }

        let extraction = self.extract_guarded(file)?;
        if let Some(reason) = &extraction.fallback_reason {
            tracing::info!(method = %extraction.method, reason = %reason, "Extraction used fallback");
        }

        let text = extraction.content.trim();
        if text.is_empty() {
            return Err(QuireError::EmptyInput(
                "No text could be extracted from the file".to_string(),
            ));
        }

        let stats = text_statistics(text);
        let min_chars = self.config.min_text_chars;
        if min_chars > 0 && stats.character_count < min_chars {
            return Err(QuireError::EmptyInput(format!(
                "Insufficient text content: found {} characters, at least {} are required",
                stats.character_count, min_chars
            )));
        }

        if stats.word_count == 0 {
            return Err(QuireError::NoReadableWords(
                "The extracted text contains no readable words".to_string(),
            ));
        }

        let assessment = assess(stats.word_count, &self.config);
        tracing::info!(
            words = assessment.word_count,
            category = %assessment.category,
            minutes = assessment.reading_time_minutes,
            method = %extraction.method,
            "Manuscript analyzed"
        );

        let info = file.info();
        let analysis = ManuscriptAnalysis {
            word_count: assessment.word_count,
            reading_time_minutes: assessment.reading_time_minutes,
            reading_time_label: format_reading_time(assessment.reading_time_minutes),
            category: assessment.category,
            extraction_method: extraction.method,
            file_name: info.file_name,
            file_size: info.file_size,
            file_type: info.file_type,
            character_count: stats.character_count,
        };

        Ok(AnalysisWithText {
            analysis,
            extracted_text: extraction.content,
        })
    }

    fn extract_guarded(&self, file: &UploadedFile) -> Result<ExtractionResult> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.extractor.extract(&file.content, &file.mime_type, &file.file_name)
        }))
        .unwrap_or_else(|payload| {
            Err(QuireError::extraction_failed(format!(
                "Extraction panicked: {}",
                panic_message(payload.as_ref())
            )))
        })
    }
}
