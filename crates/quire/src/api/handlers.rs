//! API request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};

use crate::core::analyzer::ManuscriptAnalyzer;
use crate::core::mime::{self, OCTET_STREAM_MIME_TYPE};
use crate::error::ErrorKind;
use crate::types::{AnalysisError, UploadedFile};

use super::{
    error::ApiError,
    types::{AnalyzeResponse, ApiState, ExtractResponse, HealthResponse, InfoResponse},
};

/// Multipart field carrying the manuscript.
const FILE_FIELD: &str = "file";

/// Analyze endpoint handler.
///
/// POST /analyze
///
/// Accepts multipart form data with a single `file` field. Other fields are ignored.
///
/// # Size Limits
///
/// The request body is capped at the router layer via `DefaultBodyLimit`. A body that
/// trips the cap is reported as `OversizedInput` (422) rather than a bare 413, and
/// uploads under the cap but over the configured ceiling are rejected by the analyzer
/// with the same kind.
pub async fn analyze_handler(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let upload = read_upload(&state, multipart).await?;
    let analysis = run_blocking(&state, upload, |analyzer, file| analyzer.analyze(file)).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}

/// Extract endpoint handler.
///
/// POST /extract
///
/// Same input as `/analyze`; the response also carries the extracted text.
pub async fn extract_handler(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let upload = read_upload(&state, multipart).await?;
    let output = run_blocking(&state, upload, |analyzer, file| analyzer.analyze_with_text(file)).await?;

    Ok(Json(ExtractResponse {
        success: true,
        analysis: output.analysis,
        extracted_text: output.extracted_text,
    }))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    let config = state.analyzer.config();
    let supported_formats = state
        .analyzer
        .extractor()
        .supported_formats()
        .into_iter()
        .map(|kind| kind.canonical_mime_type().to_string())
        .collect();

    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        max_upload_bytes: config.max_upload_bytes,
        words_per_minute: config.reading.words_per_minute,
        supported_formats,
    })
}

/// Read the `file` field from a multipart body.
///
/// Returns `None` when no file was sent, including an empty, unnamed `file` part
/// (what browsers submit when no file is chosen). Only the first non-empty `file`
/// part is read; anything after it is left unbuffered.
async fn read_upload(
    state: &ApiState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<UploadedFile>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        ApiError::new(
            ErrorKind::MissingInput,
            format!("Expected a multipart/form-data upload: {}", rejection.body_text()),
        )
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(state, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| multipart_error(state, e))?;

        if file_name.is_empty() && data.is_empty() {
            continue;
        }

        let mime_type = content_type.unwrap_or_else(|| {
            if file_name.is_empty() {
                OCTET_STREAM_MIME_TYPE.to_string()
            } else {
                mime::detect_mime_type(&file_name)
            }
        });

        return Ok(Some(UploadedFile::new(data.to_vec(), mime_type, file_name)));
    }

    Ok(None)
}

fn multipart_error(state: &ApiState, error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::info!(limit = state.limits.max_request_body_bytes, "Request body exceeded limit");
        ApiError::new(
            ErrorKind::OversizedInput,
            format!(
                "Request body exceeds the {} byte limit",
                state.limits.max_request_body_bytes
            ),
        )
    } else {
        ApiError::new(ErrorKind::MissingInput, format!("Invalid multipart request: {}", error.body_text()))
    }
}

/// Run an analysis on the blocking pool so parsing never stalls the executor.
async fn run_blocking<T, F>(state: &ApiState, upload: Option<UploadedFile>, analyze: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ManuscriptAnalyzer, Option<&UploadedFile>) -> Result<T, AnalysisError> + Send + 'static,
{
    let analyzer = Arc::clone(&state.analyzer);
    let file_info = upload.as_ref().map(UploadedFile::info);

    let joined = tokio::task::spawn_blocking(move || analyze(&analyzer, upload.as_ref())).await;

    match joined {
        Ok(result) => result.map_err(ApiError::from),
        Err(join_err) => {
            tracing::error!(error = %join_err, "Analysis task failed");
            Err(ApiError(
                AnalysisError::new(ErrorKind::InternalFault, "An internal error occurred while analyzing the file")
                    .with_file_info(file_info),
            ))
        }
    }
}
