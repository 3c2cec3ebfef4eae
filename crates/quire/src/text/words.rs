//! Language-agnostic word counting.
//!
//! A word is any run of letters, digits, apostrophes and hyphens that contains at
//! least one letter (`\p{L}`). Letters and digits are judged with Unicode
//! properties, so accented and non-Latin scripts count the same way ASCII does.
//! Letter-like numerals such as `Ⅻ` are digits, not letters.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace run regex pattern is valid and should compile"));

static LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}").expect("Letter regex pattern is valid and should compile"));

// Marks stay so combining accents do not split a word in two.
static NON_WORD_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}\p{M}'’\- ]").expect("Non-word character regex pattern is valid and should compile")
});

/// Count the words in `text`.
///
/// Non-word characters are replaced with a space rather than deleted, so
/// `"end.Start"` is two words, not one.
///
/// # Example
///
/// ```rust
/// use quire::text::count_words;
///
/// assert_eq!(count_words("Hello world, this is a test."), 6);
/// assert_eq!(count_words("1984 -- 2024 !!"), 0);
/// ```
pub fn count_words(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let collapsed = WHITESPACE_RUN.replace_all(trimmed, " ");
    let cleaned = NON_WORD_CHAR.replace_all(&collapsed, " ");

    cleaned
        .split(' ')
        .filter(|token| LETTER.is_match(token))
        .count()
}

/// Basic counts over a block of extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    /// Unicode scalar values in the trimmed text.
    pub character_count: usize,
    /// Lines with at least one non-whitespace character.
    pub line_count: usize,
}

pub fn text_statistics(text: &str) -> TextStatistics {
    let trimmed = text.trim();
    TextStatistics {
        word_count: count_words(trimmed),
        character_count: trimmed.chars().count(),
        line_count: trimmed.lines().filter(|line| !line.trim().is_empty()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_simple_sentence() {
        assert_eq!(count_words("Hello world, this is a test."), 6);
    }

    #[test]
    fn test_count_words_empty_and_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t  "), 0);
    }

    #[test]
    fn test_count_words_digits_and_punctuation_only() {
        assert_eq!(count_words("123 456 !!! ... --- 7,8,9"), 0);
    }

    #[test]
    fn test_count_words_emoji_only() {
        assert_eq!(count_words("📚 ✨ 🎉🎉 ★"), 0);
    }

    #[test]
    fn test_count_words_ignores_extra_whitespace() {
        let tight = "The quick brown fox jumps";
        let loose = "  The \n\n quick\t\tbrown   fox\r\njumps  ";
        assert_eq!(count_words(tight), count_words(loose));
        assert_eq!(count_words(loose), 5);
    }

    #[test]
    fn test_count_words_punctuation_does_not_merge_tokens() {
        assert_eq!(count_words("end.Start"), 2);
        assert_eq!(count_words("one/two|three"), 3);
    }

    #[test]
    fn test_count_words_keeps_apostrophes_and_hyphens() {
        assert_eq!(count_words("don't well-known rock’n’roll"), 3);
    }

    #[test]
    fn test_count_words_mixed_alphanumeric() {
        assert_eq!(count_words("R2D2 and 3PO met in 1977"), 5);
    }

    #[test]
    fn test_count_words_unicode_scripts() {
        assert_eq!(count_words("Café naïve résumé"), 3);
        assert_eq!(count_words("Привет мир"), 2);
        assert_eq!(count_words("नमस्ते दुनिया"), 2);
    }

    #[test]
    fn test_count_words_letter_numerals_are_not_letters() {
        assert_eq!(count_words("Ⅻ chapters"), 1);
        assert_eq!(count_words("Ⅰ Ⅱ Ⅲ Ⅳ"), 0);
    }

    #[test]
    fn test_text_statistics() {
        let stats = text_statistics("  First line here.\n\n  Second line  \n");
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.character_count, "First line here.\n\n  Second line".chars().count());
    }

    #[test]
    fn test_text_statistics_empty() {
        assert_eq!(text_statistics(" \n "), TextStatistics::default());
    }
}
