//! Plain text and Markdown decoding.

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode bytes as UTF-8, replacing invalid sequences and dropping a leading BOM.
///
/// Markdown is returned as-is; markup characters are handled by the word counter.
///
/// # Example
///
/// ```rust
/// use quire::extraction::decode_lossy;
///
/// assert_eq!(decode_lossy(b"\xEF\xBB\xBFHello"), "Hello");
/// assert_eq!(decode_lossy(b"caf\xFF"), "caf\u{FFFD}");
/// ```
pub fn decode_lossy(content: &[u8]) -> String {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    String::from_utf8_lossy(content).into_owned()
}
