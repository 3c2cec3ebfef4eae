//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::analyzer::ManuscriptAnalyzer;
use crate::core::config::AnalysisConfig;
use crate::types::{AnalysisError, ManuscriptAnalysis};

/// Room left in the request body for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// API server size limit configuration.
///
/// The request body limit bounds how much of an upload is read before the analyzer
/// sees it. By default it is the configured upload ceiling plus multipart overhead,
/// so uploads just over the ceiling still reach the analyzer and get a structured
/// `OversizedInput` response.
///
/// # Configuration via Environment Variables
///
/// ```bash
/// # In bytes:
/// export QUIRE_MAX_REQUEST_BODY_BYTES=53477376
///
/// # Legacy, in MB:
/// export QUIRE_MAX_UPLOAD_SIZE_MB=51
/// ```
///
/// # Examples
///
/// ```
/// use quire::api::ApiSizeLimits;
/// use quire::core::config::AnalysisConfig;
///
/// let limits = ApiSizeLimits::for_config(&AnalysisConfig::default());
/// assert_eq!(limits.max_request_body_bytes, 51 * 1024 * 1024);
///
/// let limits = ApiSizeLimits::from_mb(10);
/// assert_eq!(limits.max_request_body_bytes, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self::for_config(&AnalysisConfig::default())
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize) -> Self {
        Self { max_request_body_bytes }
    }

    pub fn from_mb(max_request_body_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb.saturating_mul(1024 * 1024),
        }
    }

    /// Limits sized from the configured upload ceiling.
    pub fn for_config(config: &AnalysisConfig) -> Self {
        let upload = usize::try_from(config.max_upload_bytes).unwrap_or(usize::MAX);
        Self {
            max_request_body_bytes: upload.saturating_add(MULTIPART_OVERHEAD_BYTES),
        }
    }
}

/// API server state.
///
/// The analyzer is immutable and shared across all requests.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub analyzer: Arc<ManuscriptAnalyzer>,
    pub limits: ApiSizeLimits,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub version: String,
    pub max_upload_bytes: u64,
    pub words_per_minute: u32,
    /// Media types with a dedicated extractor.
    pub supported_formats: Vec<String>,
}

/// Successful `POST /analyze` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: ManuscriptAnalysis,
}

/// Successful `POST /extract` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    pub analysis: ManuscriptAnalysis,
    pub extracted_text: String,
}

/// Error response body: `{ "success": false, "errorKind": ..., "detail": ..., "fileInfo": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(flatten)]
    pub error: AnalysisError,
}

impl From<AnalysisError> for ErrorResponse {
    fn from(error: AnalysisError) -> Self {
        Self { success: false, error }
    }
}
