//! Quire - Manuscript Text Extraction and Length Classification
//!
//! Quire extracts text from manuscript uploads (plain text, Markdown, DOCX, PDF),
//! counts words with a language-agnostic rule, and classifies the manuscript by length
//! from short piece to epic novel, with an estimated reading time.
//!
//! # Quick Start
//!
//! ```rust
//! use quire::{ManuscriptAnalyzer, UploadedFile};
//!
//! let analyzer = ManuscriptAnalyzer::default();
//! let file = UploadedFile::new(b"It was a dark and stormy night.".to_vec(), "text/plain", "opening.txt");
//!
//! let analysis = analyzer.analyze(Some(&file)).unwrap();
//! println!("{} words, {}", analysis.word_count, analysis.category);
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): analysis orchestration, format dispatch, MIME detection, config loading
//! - **Extractors** (`extractors`): DOCX, PDF and plain text strategies behind the `DocumentExtractor` trait
//! - **Text** (`text`): word counting and text statistics
//! - **Classification** (`classify`): length categories and reading time
//! - **API** (`api`, feature `api`): Axum HTTP server
//!
//! # Features
//!
//! - `office` (default): DOCX extraction via docx-lite
//! - `pdf` (default): PDF extraction via lopdf
//! - `api`: HTTP server
//! - `full`: everything

#![deny(unsafe_code)]

pub mod classify;
pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod plugins;
pub mod text;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{ErrorKind, QuireError, Result, StatusClass};
pub use types::*;

pub use classify::{
    ALTERNATE_NOVEL_UPPER_BOUND, ALTERNATE_WORDS_PER_MINUTE, CategoryThresholds, DEFAULT_WORDS_PER_MINUTE,
    ManuscriptCategory, WordCountResult, classify, estimated_reading_time, format_reading_time,
};
pub use core::analyzer::{AnalysisWithText, ManuscriptAnalyzer};
pub use core::config::{AnalysisConfig, DEFAULT_MAX_UPLOAD_BYTES, ReadingConfig, UnsupportedFormatPolicy};
pub use core::extractor::FormatExtractor;
pub use core::mime::{
    DOCX_MIME_TYPE, FormatKind, MARKDOWN_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, detect_mime_type,
};
pub use plugins::{DocumentExtractor, Plugin};
pub use text::{TextStatistics, count_words, text_statistics};
