//! Core analysis orchestration.
//!
//! - **Configuration**: [`config::AnalysisConfig`] loaded from TOML, YAML or JSON
//! - **MIME Detection**: declared type and file name to [`mime::FormatKind`]
//! - **Extraction**: [`extractor::FormatExtractor`] dispatch with strategy fallback
//! - **Analysis**: [`analyzer::ManuscriptAnalyzer`], the request-level entry point

pub mod analyzer;
pub mod config;
pub mod extractor;
pub mod mime;

pub use analyzer::{AnalysisWithText, ManuscriptAnalyzer};
pub use config::{AnalysisConfig, ReadingConfig, UnsupportedFormatPolicy};
pub use extractor::FormatExtractor;
pub use mime::FormatKind;
