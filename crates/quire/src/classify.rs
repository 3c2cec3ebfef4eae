//! Manuscript length classification and reading time.
//!
//! Categories are derived purely from word count using ascending, non-overlapping
//! upper bounds. Reading time is `ceil(word_count / words_per_minute)`.
use serde::{Deserialize, Serialize};

use crate::core::config::AnalysisConfig;
use crate::{QuireError, Result};

/// Words per minute used for reading time estimates.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;
/// Faster reading rate used by the original upload flow.
pub const ALTERNATE_WORDS_PER_MINUTE: u32 = 250;

pub const SHORT_PIECE_UPPER_BOUND: usize = 1_000;
pub const SHORT_STORY_UPPER_BOUND: usize = 7_500;
pub const NOVELETTE_UPPER_BOUND: usize = 20_000;
pub const NOVELLA_UPPER_BOUND: usize = 50_000;
pub const NOVEL_UPPER_BOUND: usize = 120_000;
/// Lower novel ceiling used by the original upload flow.
pub const ALTERNATE_NOVEL_UPPER_BOUND: usize = 110_000;

/// Length class of a manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManuscriptCategory {
    #[serde(rename = "Short piece")]
    ShortPiece,
    #[serde(rename = "Short story")]
    ShortStory,
    Novelette,
    Novella,
    Novel,
    #[serde(rename = "Epic novel")]
    EpicNovel,
}

impl ManuscriptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManuscriptCategory::ShortPiece => "Short piece",
            ManuscriptCategory::ShortStory => "Short story",
            ManuscriptCategory::Novelette => "Novelette",
            ManuscriptCategory::Novella => "Novella",
            ManuscriptCategory::Novel => "Novel",
            ManuscriptCategory::EpicNovel => "Epic novel",
        }
    }
}

impl std::fmt::Display for ManuscriptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclusive upper bounds for each category below `EpicNovel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    #[serde(default = "default_short_piece")]
    pub short_piece: usize,
    #[serde(default = "default_short_story")]
    pub short_story: usize,
    #[serde(default = "default_novelette")]
    pub novelette: usize,
    #[serde(default = "default_novella")]
    pub novella: usize,
    #[serde(default = "default_novel")]
    pub novel: usize,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            short_piece: default_short_piece(),
            short_story: default_short_story(),
            novelette: default_novelette(),
            novella: default_novella(),
            novel: default_novel(),
        }
    }
}

impl CategoryThresholds {
    /// Thresholds with the lower novel ceiling.
    pub fn alternate() -> Self {
        Self {
            novel: ALTERNATE_NOVEL_UPPER_BOUND,
            ..Self::default()
        }
    }

    /// Check that bounds are non-zero and strictly ascending.
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("short_piece", self.short_piece),
            ("short_story", self.short_story),
            ("novelette", self.novelette),
            ("novella", self.novella),
            ("novel", self.novel),
        ];

        if let Some((name, _)) = bounds.iter().find(|(_, bound)| *bound == 0) {
            return Err(QuireError::validation(format!("Category threshold '{name}' must be greater than 0")));
        }

        for pair in bounds.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if upper <= lower {
                return Err(QuireError::validation(format!(
                    "Category threshold '{upper_name}' ({upper}) must be greater than '{lower_name}' ({lower})"
                )));
            }
        }

        Ok(())
    }
}

fn default_short_piece() -> usize {
    SHORT_PIECE_UPPER_BOUND
}

fn default_short_story() -> usize {
    SHORT_STORY_UPPER_BOUND
}

fn default_novelette() -> usize {
    NOVELETTE_UPPER_BOUND
}

fn default_novella() -> usize {
    NOVELLA_UPPER_BOUND
}

fn default_novel() -> usize {
    NOVEL_UPPER_BOUND
}

/// Map a word count to its category. Total and monotonic in `word_count`.
pub fn classify(word_count: usize, thresholds: &CategoryThresholds) -> ManuscriptCategory {
    if word_count < thresholds.short_piece {
        ManuscriptCategory::ShortPiece
    } else if word_count < thresholds.short_story {
        ManuscriptCategory::ShortStory
    } else if word_count < thresholds.novelette {
        ManuscriptCategory::Novelette
    } else if word_count < thresholds.novella {
        ManuscriptCategory::Novella
    } else if word_count < thresholds.novel {
        ManuscriptCategory::Novel
    } else {
        ManuscriptCategory::EpicNovel
    }
}

/// Minutes needed to read `word_count` words, rounded up.
///
/// A rate of zero is treated as one word per minute.
pub fn estimated_reading_time(word_count: usize, words_per_minute: u32) -> u64 {
    let wpm = u64::from(words_per_minute.max(1));
    (word_count as u64).div_ceil(wpm)
}

/// Human-readable reading time, e.g. `"12 min read"`, `"2 hr read"`, `"1h 30m read"`.
pub fn format_reading_time(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes} min read");
    }

    let hours = minutes / 60;
    let remainder = minutes % 60;
    if remainder == 0 {
        format!("{hours} hr read")
    } else {
        format!("{hours}h {remainder}m read")
    }
}

/// Word count with its derived category and reading time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCountResult {
    pub word_count: usize,
    pub category: ManuscriptCategory,
    pub reading_time_minutes: u64,
}

pub fn assess(word_count: usize, config: &AnalysisConfig) -> WordCountResult {
    WordCountResult {
        word_count,
        category: classify(word_count, &config.categories),
        reading_time_minutes: estimated_reading_time(word_count, config.reading.words_per_minute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let t = CategoryThresholds::default();
        assert_eq!(classify(0, &t), ManuscriptCategory::ShortPiece);
        assert_eq!(classify(999, &t), ManuscriptCategory::ShortPiece);
        assert_eq!(classify(1_000, &t), ManuscriptCategory::ShortStory);
        assert_eq!(classify(7_499, &t), ManuscriptCategory::ShortStory);
        assert_eq!(classify(7_500, &t), ManuscriptCategory::Novelette);
        assert_eq!(classify(20_000, &t), ManuscriptCategory::Novella);
        assert_eq!(classify(50_000, &t), ManuscriptCategory::Novel);
        assert_eq!(classify(119_999, &t), ManuscriptCategory::Novel);
        assert_eq!(classify(120_000, &t), ManuscriptCategory::EpicNovel);
        assert_eq!(classify(usize::MAX, &t), ManuscriptCategory::EpicNovel);
    }

    #[test]
    fn test_classify_alternate_novel_bound() {
        let t = CategoryThresholds::alternate();
        assert_eq!(classify(109_999, &t), ManuscriptCategory::Novel);
        assert_eq!(classify(110_000, &t), ManuscriptCategory::EpicNovel);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let t = CategoryThresholds::default();
        let mut previous = classify(0, &t);
        for count in (0..200_000).step_by(250) {
            let current = classify(count, &t);
            assert!(current >= previous, "category went backwards at {count}");
            previous = current;
        }
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(estimated_reading_time(0, 200), 0);
        assert_eq!(estimated_reading_time(1, 200), 1);
        assert_eq!(estimated_reading_time(200, 200), 1);
        assert_eq!(estimated_reading_time(201, 200), 2);
        assert_eq!(estimated_reading_time(1_000, ALTERNATE_WORDS_PER_MINUTE), 4);
        assert_eq!(estimated_reading_time(5, 0), 5);
    }

    #[test]
    fn test_reading_time_non_decreasing() {
        let mut previous = 0;
        for count in 0..5_000 {
            let minutes = estimated_reading_time(count, DEFAULT_WORDS_PER_MINUTE);
            assert!(minutes >= previous);
            if count > 0 {
                assert!(minutes >= 1);
            }
            previous = minutes;
        }
    }

    #[test]
    fn test_format_reading_time() {
        assert_eq!(format_reading_time(0), "0 min read");
        assert_eq!(format_reading_time(45), "45 min read");
        assert_eq!(format_reading_time(60), "1 hr read");
        assert_eq!(format_reading_time(90), "1h 30m read");
        assert_eq!(format_reading_time(600), "10 hr read");
    }

    #[test]
    fn test_thresholds_validate() {
        assert!(CategoryThresholds::default().validate().is_ok());
        assert!(CategoryThresholds::alternate().validate().is_ok());

        let unordered = CategoryThresholds {
            novelette: 5_000,
            ..CategoryThresholds::default()
        };
        let err = unordered.validate().unwrap_err();
        assert!(err.to_string().contains("novelette"));

        let zero = CategoryThresholds {
            short_piece: 0,
            ..CategoryThresholds::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(
            serde_json::to_string(&ManuscriptCategory::ShortPiece).unwrap(),
            "\"Short piece\""
        );
        assert_eq!(ManuscriptCategory::EpicNovel.to_string(), "Epic novel");
        let parsed: ManuscriptCategory = serde_json::from_str("\"Novella\"").unwrap();
        assert_eq!(parsed, ManuscriptCategory::Novella);
    }

    #[test]
    fn test_assess_uses_config() {
        let config = AnalysisConfig::default();
        let result = assess(401, &config);
        assert_eq!(result.category, ManuscriptCategory::ShortPiece);
        assert_eq!(result.reading_time_minutes, 3);
    }
}
