//! Format-specific text extraction functions.
//!
//! These are the raw parsers behind the extractor plugins in
//! [`extractors`](crate::extractors). Each returns `Err` on a malformed document and
//! never attempts its own recovery.

pub mod docx;
pub mod pdf;
pub mod text;

pub use text::decode_lossy;
