//! MIME type detection and format dispatch.
//!
//! Uploads carry a declared media type and file name. [`FormatKind::detect`] turns the
//! pair into the tagged format the extractor dispatches on. Declared types are trusted;
//! [`sniff_mismatch`] only reports disagreement with the content for diagnostics.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const MARKDOWN_LEGACY_MIME_TYPE: &str = "text/x-markdown";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
pub const RTF_MIME_TYPE: &str = "application/rtf";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";
const ZIP_MIME_TYPE: &str = "application/zip";

static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("text", PLAIN_TEXT_MIME_TYPE);
    m.insert("md", MARKDOWN_MIME_TYPE);
    m.insert("markdown", MARKDOWN_MIME_TYPE);

    m.insert("pdf", PDF_MIME_TYPE);

    m.insert("docx", DOCX_MIME_TYPE);
    m.insert("doc", LEGACY_WORD_MIME_TYPE);
    m.insert("rtf", RTF_MIME_TYPE);

    m
});

/// Format families with a dedicated extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    PlainText,
    Markdown,
    Docx,
    Pdf,
    /// Anything else. Handled by the generic fallback or rejected, per policy.
    Unknown,
}

impl FormatKind {
    /// Resolve the format from a declared media type and file name.
    ///
    /// First match wins, in order DOCX, PDF, plain text, Markdown. Media types are
    /// compared without case or parameters, extensions without case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quire::core::mime::FormatKind;
    ///
    /// assert_eq!(FormatKind::detect("text/plain; charset=utf-8", "notes"), FormatKind::PlainText);
    /// assert_eq!(FormatKind::detect("application/octet-stream", "Draft.DOCX"), FormatKind::Docx);
    /// assert_eq!(FormatKind::detect("image/png", "cover.png"), FormatKind::Unknown);
    /// ```
    pub fn detect(mime_type: &str, file_name: &str) -> Self {
        let mime = normalize_mime(mime_type);
        let extension = file_extension(file_name);
        let ext = extension.as_deref();

        if mime == DOCX_MIME_TYPE || ext == Some("docx") {
            FormatKind::Docx
        } else if mime == PDF_MIME_TYPE || ext == Some("pdf") {
            FormatKind::Pdf
        } else if mime == PLAIN_TEXT_MIME_TYPE || ext == Some("txt") {
            FormatKind::PlainText
        } else if mime == MARKDOWN_MIME_TYPE
            || mime == MARKDOWN_LEGACY_MIME_TYPE
            || matches!(ext, Some("md") | Some("markdown"))
        {
            FormatKind::Markdown
        } else {
            FormatKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::PlainText => "plain_text",
            FormatKind::Markdown => "markdown",
            FormatKind::Docx => "docx",
            FormatKind::Pdf => "pdf",
            FormatKind::Unknown => "unknown",
        }
    }

    /// Media type reported for this format in capability listings.
    pub fn canonical_mime_type(&self) -> &'static str {
        match self {
            FormatKind::PlainText => PLAIN_TEXT_MIME_TYPE,
            FormatKind::Markdown => MARKDOWN_MIME_TYPE,
            FormatKind::Docx => DOCX_MIME_TYPE,
            FormatKind::Pdf => PDF_MIME_TYPE,
            FormatKind::Unknown => OCTET_STREAM_MIME_TYPE,
        }
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase a media type and drop any parameters.
pub fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Detect a media type from a file path's extension.
///
/// Known manuscript extensions come from a fixed table; everything else is guessed
/// with `mime_guess`, and `application/octet-stream` when no guess exists.
pub fn detect_mime_type(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase());

    if let Some(ext) = &extension
        && let Some(mime_type) = EXT_TO_MIME.get(ext.as_str())
    {
        return mime_type.to_string();
    }

    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| OCTET_STREAM_MIME_TYPE.to_string())
}

/// Sniff a media type from magic bytes.
pub fn sniff_mime_type(content: &[u8]) -> Option<&'static str> {
    infer::get(content).map(|kind| kind.mime_type())
}

/// Report the sniffed media type when it contradicts the declared format.
///
/// Returns `None` when the content agrees or cannot be identified.
pub fn sniff_mismatch(declared: FormatKind, content: &[u8]) -> Option<&'static str> {
    let sniffed = sniff_mime_type(content)?;

    let consistent = match declared {
        FormatKind::Docx => sniffed == DOCX_MIME_TYPE || sniffed == ZIP_MIME_TYPE,
        FormatKind::Pdf => sniffed == PDF_MIME_TYPE,
        FormatKind::PlainText | FormatKind::Markdown => sniffed.starts_with("text/"),
        FormatKind::Unknown => true,
    };

    (!consistent).then_some(sniffed)
}
