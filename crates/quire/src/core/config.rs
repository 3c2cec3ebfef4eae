//! Configuration loading and management.
//!
//! This module provides utilities for loading analysis configuration from various
//! sources (TOML, YAML, JSON) and discovering configuration files in the project hierarchy.

use crate::classify::{CategoryThresholds, DEFAULT_WORDS_PER_MINUTE};
use crate::{QuireError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upload ceiling: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Main analysis configuration.
///
/// Injected into the analyzer and the format extractor. It can be loaded from TOML,
/// YAML, or JSON files, or created programmatically.
///
/// # Example
///
/// ```rust
/// use quire::core::config::AnalysisConfig;
///
/// // Create with defaults
/// let config = AnalysisConfig::default();
/// assert_eq!(config.reading.words_per_minute, 200);
///
/// // Load from TOML file
/// // let config = AnalysisConfig::from_toml_file("quire.toml")?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Largest accepted upload, in bytes. Also the PDF parse ceiling.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub categories: CategoryThresholds,

    /// What to do with media types that have no dedicated extractor.
    #[serde(default)]
    pub unsupported_formats: UnsupportedFormatPolicy,

    /// Minimum trimmed characters of extracted text. 0 disables the check.
    #[serde(default)]
    pub min_text_chars: usize,
}

/// Reading time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

/// Handling of uploads whose type is not plain text, Markdown, DOCX or PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedFormatPolicy {
    /// Decode the bytes as UTF-8 and count whatever text comes out.
    #[default]
    Fallback,
    /// Fail with `UnsupportedFormat`.
    Reject,
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            reading: ReadingConfig::default(),
            categories: CategoryThresholds::default(),
            unsupported_formats: UnsupportedFormatPolicy::default(),
            min_text_chars: 0,
        }
    }
}

impl AnalysisConfig {
    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Validation` when thresholds are not strictly ascending,
    /// any threshold is zero, the reading rate is zero, or the upload ceiling is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(QuireError::validation("max_upload_bytes must be greater than 0"));
        }
        if self.reading.words_per_minute == 0 {
            return Err(QuireError::validation("reading.words_per_minute must be greater than 0"));
        }
        self.categories.validate()
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Validation` if file doesn't exist, is invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| QuireError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| QuireError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| QuireError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognized; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `quire.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(QuireError::Io)?;

        loop {
            let quire_toml = current.join("quire.toml");
            if quire_toml.exists() {
                tracing::debug!(path = %quire_toml.display(), "Discovered configuration file");
                return Ok(Some(Self::from_toml_file(quire_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| QuireError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
