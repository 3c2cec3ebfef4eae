//! Error types for Quire.
//!
//! Every fallible operation in the library returns [`QuireError`]. Each variant maps to
//! exactly one [`ErrorKind`], the stable identifier that callers (and the HTTP API) see.
//!
//! # Error Handling Philosophy
//!
//! **Parser failures never reach the caller directly.** Structured DOCX/PDF parsing
//! errors are `Parsing` errors; the format extractor converts them into a fallback
//! result instead of propagating them.
//!
//! **Analysis outcomes are first-class variants:**
//! - `MissingInput` - no file supplied
//! - `OversizedInput` - declared or actual size above the configured ceiling
//! - `EmptyInput` - extraction produced no text
//! - `NoReadableWords` - text exists but no token contains a letter
//! - `ExtractionFailed` - extraction could not produce any result
//! - `UnsupportedFormat` - only raised under the `reject` policy
//!
//! **System errors bubble up unchanged:** `Io` is never wrapped, and is reported to
//! callers as an internal fault.
//!
//! # Example
//!
//! ```rust
//! use quire::{ErrorKind, QuireError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(QuireError::EmptyInput("No text could be extracted".to_string()));
//!     }
//!     Ok(text)
//! }
//!
//! let err = require_text("   ").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::EmptyInput);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using `QuireError`.
pub type Result<T> = std::result::Result<T, QuireError>;

/// Main error type for all Quire operations.
#[derive(Debug, Error)]
pub enum QuireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("No file provided: {0}")]
    MissingInput(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    OversizedInput { size: u64, limit: u64 },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("No readable words: {0}")]
    NoReadableWords(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for QuireError {
    fn from(err: serde_json::Error) -> Self {
        QuireError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl QuireError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);
    error_constructor!(extraction_failed, ExtractionFailed);

    /// The stable kind reported to callers for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuireError::MissingInput(_) => ErrorKind::MissingInput,
            QuireError::OversizedInput { .. } => ErrorKind::OversizedInput,
            QuireError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            QuireError::EmptyInput(_) => ErrorKind::EmptyInput,
            QuireError::NoReadableWords(_) => ErrorKind::NoReadableWords,
            QuireError::ExtractionFailed { .. } | QuireError::Parsing { .. } | QuireError::MissingDependency(_) => {
                ErrorKind::ExtractionFailed
            }
            QuireError::Io(_)
            | QuireError::Validation { .. }
            | QuireError::Serialization { .. }
            | QuireError::Other(_) => ErrorKind::InternalFault,
        }
    }
}

/// Stable, caller-facing classification of a failed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingInput,
    UnsupportedFormat,
    OversizedInput,
    ExtractionFailed,
    EmptyInput,
    NoReadableWords,
    InternalFault,
}

/// Coarse status class used to pick a transport-level status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Malformed or missing input.
    ClientError,
    /// Size, format or content problems found while processing.
    UnprocessableContent,
    /// Unexpected internal fault.
    ServerError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingInput => "MissingInput",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::OversizedInput => "OversizedInput",
            ErrorKind::ExtractionFailed => "ExtractionFailed",
            ErrorKind::EmptyInput => "EmptyInput",
            ErrorKind::NoReadableWords => "NoReadableWords",
            ErrorKind::InternalFault => "InternalFault",
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            ErrorKind::MissingInput => StatusClass::ClientError,
            ErrorKind::InternalFault => StatusClass::ServerError,
            ErrorKind::UnsupportedFormat
            | ErrorKind::OversizedInput
            | ErrorKind::ExtractionFailed
            | ErrorKind::EmptyInput
            | ErrorKind::NoReadableWords => StatusClass::UnprocessableContent,
        }
    }

    /// HTTP status code for this kind (400, 422 or 500).
    pub fn http_status(&self) -> u16 {
        match self.status_class() {
            StatusClass::ClientError => 400,
            StatusClass::UnprocessableContent => 422,
            StatusClass::ServerError => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
