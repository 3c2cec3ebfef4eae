//! Extraction strategy traits.
//!
//! Structured format parsers implement [`DocumentExtractor`] and are injected into the
//! [`FormatExtractor`](crate::core::extractor::FormatExtractor) as trait objects, so
//! tests and embedders can substitute their own strategies.

pub mod extractor;
pub mod traits;

pub use extractor::DocumentExtractor;
pub use traits::Plugin;
