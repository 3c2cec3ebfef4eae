//! Document extractor plugin trait.

use crate::Result;
use crate::core::mime::FormatKind;
use crate::plugins::Plugin;

/// A structured text extraction strategy for one or more formats.
///
/// Implementations return `Err` (or panic) when the document cannot be parsed; the
/// format extractor turns either outcome into its fallback path, so a strategy never
/// needs to recover on its own.
///
/// # Example
///
/// ```rust
/// use quire::core::mime::FormatKind;
/// use quire::plugins::{DocumentExtractor, Plugin};
/// use quire::Result;
///
/// struct ShoutingExtractor;
///
/// impl Plugin for ShoutingExtractor {
///     fn name(&self) -> &str {
///         "shouting-extractor"
///     }
/// }
///
/// impl DocumentExtractor for ShoutingExtractor {
///     fn extract_text(&self, content: &[u8]) -> Result<String> {
///         Ok(String::from_utf8_lossy(content).to_uppercase())
///     }
///
///     fn supported_formats(&self) -> &[FormatKind] {
///         &[FormatKind::PlainText]
///     }
/// }
///
/// assert_eq!(ShoutingExtractor.extract_text(b"hi").unwrap(), "HI");
/// ```
pub trait DocumentExtractor: Plugin {
    /// Extract plain text from the raw document bytes.
    fn extract_text(&self, content: &[u8]) -> Result<String>;

    /// Formats this extractor handles.
    fn supported_formats(&self) -> &[FormatKind];
}
