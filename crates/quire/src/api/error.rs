//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::{ErrorKind, QuireError};
use crate::types::AnalysisError;

use super::types::ErrorResponse;

/// Error returned by API handlers.
///
/// Wraps an [`AnalysisError`] and renders it as JSON with the status its kind maps to.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl ApiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self(AnalysisError::new(kind, detail))
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        Self(error)
    }
}

impl From<QuireError> for ApiError {
    fn from(error: QuireError) -> Self {
        Self(AnalysisError::from_error(&error, None))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error_kind = %self.0.error_kind, detail = %self.0.detail, "Request failed");
        } else {
            tracing::debug!(error_kind = %self.0.error_kind, detail = %self.0.detail, "Request rejected");
        }
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::new(ErrorKind::MissingInput, "x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::new(ErrorKind::NoReadableWords, "x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::new(ErrorKind::InternalFault, "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_quire_error() {
        let err = ApiError::from(QuireError::OversizedInput { size: 10, limit: 5 });
        assert_eq!(err.0.error_kind, ErrorKind::OversizedInput);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::new(ErrorKind::EmptyInput, "nothing here").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
