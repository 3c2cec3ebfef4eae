use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::ManuscriptCategory;
use crate::error::{ErrorKind, QuireError};
use crate::{Result, core::mime};

/// An uploaded manuscript, owned for the duration of one analysis.
///
/// Built at the boundary (multipart parsing or a CLI file read). The declared media
/// type and file name are trusted as given; they are never verified against content.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
    /// Size claimed by the client. Defaults to the actual content length.
    pub declared_size: u64,
}

impl UploadedFile {
    pub fn new(content: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        let declared_size = content.len() as u64;
        Self {
            content,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
            declared_size,
        }
    }

    pub fn with_declared_size(mut self, declared_size: u64) -> Self {
        self.declared_size = declared_size;
        self
    }

    /// Read a file from disk, detecting its media type from the extension unless one is given.
    pub fn from_path(path: impl AsRef<Path>, mime_type: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let mime_type = match mime_type {
            Some(m) => m.to_string(),
            None => mime::detect_mime_type(path),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(content, mime_type, file_name))
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            file_name: self.file_name.clone(),
            file_size: self.declared_size.max(self.content.len() as u64),
            file_type: self.mime_type.clone(),
        }
    }
}

/// File metadata echoed back in success and failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

/// The strategy that actually produced the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Plain text or Markdown decoded as UTF-8.
    Direct,
    DocxParsed,
    PdfParsed,
    DocxFallback,
    PdfFallback,
    /// Unrecognized type decoded as UTF-8.
    GenericFallback,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Direct => "direct",
            ExtractionMethod::DocxParsed => "docx-parsed",
            ExtractionMethod::PdfParsed => "pdf-parsed",
            ExtractionMethod::DocxFallback => "docx-fallback",
            ExtractionMethod::PdfFallback => "pdf-fallback",
            ExtractionMethod::GenericFallback => "generic-fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ExtractionMethod::DocxFallback | ExtractionMethod::PdfFallback | ExtractionMethod::GenericFallback
        )
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by the format extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text, possibly empty.
    pub content: String,
    pub method: ExtractionMethod,
    /// True when the primary strategy produced the text.
    pub success: bool,
    /// Why the primary strategy was abandoned, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ExtractionResult {
    pub fn parsed(content: String, method: ExtractionMethod) -> Self {
        Self {
            content,
            method,
            success: true,
            fallback_reason: None,
        }
    }

    pub fn fallback(content: String, method: ExtractionMethod, reason: impl Into<String>) -> Self {
        Self {
            content,
            method,
            success: false,
            fallback_reason: Some(reason.into()),
        }
    }
}

/// Successful analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManuscriptAnalysis {
    pub word_count: usize,
    pub reading_time_minutes: u64,
    pub reading_time_label: String,
    pub category: ManuscriptCategory,
    pub extraction_method: ExtractionMethod,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub character_count: usize,
}

/// Terminal failure of an analysis, as reported to callers.
///
/// Carries only the kind and a human-readable detail. Internal faults never expose
/// the underlying error text; it is logged instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisError {
    pub error_kind: ErrorKind,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
}

impl AnalysisError {
    pub fn new(error_kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            error_kind,
            detail: detail.into(),
            file_info: None,
        }
    }

    pub fn with_file_info(mut self, file_info: Option<FileInfo>) -> Self {
        self.file_info = file_info;
        self
    }

    pub fn from_error(error: &QuireError, file_info: Option<FileInfo>) -> Self {
        let kind = error.kind();
        let detail = match error {
            QuireError::MissingInput(msg)
            | QuireError::UnsupportedFormat(msg)
            | QuireError::EmptyInput(msg)
            | QuireError::NoReadableWords(msg) => msg.clone(),
            QuireError::OversizedInput { size, limit } => {
                format!("File is {size} bytes; the maximum allowed size is {limit} bytes")
            }
            QuireError::ExtractionFailed { message, .. } | QuireError::Parsing { message, .. } => {
                format!("Could not extract text: {message}")
            }
            QuireError::MissingDependency(msg) => format!("Could not extract text: {msg}"),
            QuireError::Io(_)
            | QuireError::Validation { .. }
            | QuireError::Serialization { .. }
            | QuireError::Other(_) => {
                tracing::error!(error = %error, "Internal fault during analysis");
                "An internal error occurred while analyzing the file".to_string()
            }
        };

        Self {
            error_kind: kind,
            detail,
            file_info,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.error_kind.http_status()
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_kind, self.detail)
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_defaults_declared_size() {
        let file = UploadedFile::new(b"hello".to_vec(), "text/plain", "a.txt");
        assert_eq!(file.declared_size, 5);

        let file = file.with_declared_size(10);
        assert_eq!(file.info().file_size, 10);
    }

    #[test]
    fn test_uploaded_file_info_uses_larger_size() {
        let file = UploadedFile::new(b"hello world".to_vec(), "text/plain", "a.txt").with_declared_size(2);
        assert_eq!(file.info().file_size, 11);
    }

    #[test]
    fn test_from_path_detects_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.md");
        std::fs::write(&path, "# Title").unwrap();

        let file = UploadedFile::from_path(&path, None).unwrap();
        assert_eq!(file.mime_type, "text/markdown");
        assert_eq!(file.file_name, "draft.md");

        let file = UploadedFile::from_path(&path, Some("text/plain")).unwrap();
        assert_eq!(file.mime_type, "text/plain");
    }

    #[test]
    fn test_extraction_method_serde() {
        assert_eq!(
            serde_json::to_string(&ExtractionMethod::DocxFallback).unwrap(),
            "\"docx-fallback\""
        );
        assert_eq!(ExtractionMethod::GenericFallback.to_string(), "generic-fallback");
        assert!(ExtractionMethod::PdfFallback.is_fallback());
        assert!(!ExtractionMethod::Direct.is_fallback());
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let analysis = ManuscriptAnalysis {
            word_count: 6,
            reading_time_minutes: 1,
            reading_time_label: "1 min read".to_string(),
            category: ManuscriptCategory::ShortPiece,
            extraction_method: ExtractionMethod::Direct,
            file_name: "a.txt".to_string(),
            file_size: 28,
            file_type: "text/plain".to_string(),
            character_count: 28,
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["wordCount"], 6);
        assert_eq!(json["readingTimeMinutes"], 1);
        assert_eq!(json["category"], "Short piece");
        assert_eq!(json["extractionMethod"], "direct");
        assert_eq!(json["fileType"], "text/plain");
    }

    #[test]
    fn test_analysis_error_payload() {
        let info = FileInfo {
            file_name: "big.pdf".to_string(),
            file_size: 100,
            file_type: "application/pdf".to_string(),
        };
        let err = AnalysisError::from_error(&QuireError::OversizedInput { size: 100, limit: 10 }, Some(info));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["errorKind"], "OversizedInput");
        assert_eq!(json["fileInfo"]["fileName"], "big.pdf");
        assert_eq!(err.http_status(), 422);
    }

    #[test]
    fn test_analysis_error_hides_internal_detail() {
        let io = std::io::Error::other("/secret/path exploded");
        let err = AnalysisError::from_error(&QuireError::Io(io), None);

        assert_eq!(err.error_kind, ErrorKind::InternalFault);
        assert!(!err.detail.contains("/secret/path"));
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("fileInfo").is_none());
    }
}
