//! Text normalization and counting.

pub mod words;

pub use words::{TextStatistics, count_words, text_statistics};
