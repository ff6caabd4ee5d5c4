use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractMethod;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No results found for request ID: {0}")]
    ResultNotFound(String),

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Unsupported file type: {0}")]
    InvalidFileType(String),

    #[error("Filename is required")]
    MissingFilename,

    #[error("File too large ({size_bytes} bytes)")]
    FileTooLarge { size_bytes: usize },

    #[error("Empty file provided")]
    EmptyFile,

    #[error("Batch size {got} exceeds maximum of {max}")]
    BatchSizeExceeded { got: usize, max: usize },

    #[error("No text could be extracted from the file")]
    EmptyExtraction,

    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    #[error("Model backend is not available")]
    BackendUnavailable,

    #[error("Extraction timed out after {0}s")]
    BackendTimeout(u64),

    #[error("{method} extraction failed: {message}")]
    ExtractionFailed {
        method: ExtractMethod,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ResultNotFound(_) => "RESULT_NOT_FOUND",
            AppError::InvalidMethod(_) => "INVALID_METHOD",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::MissingFilename => "MISSING_FILENAME",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::BatchSizeExceeded { .. } => "BATCH_SIZE_EXCEEDED",
            AppError::EmptyExtraction => "EMPTY_EXTRACTION",
            AppError::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            AppError::BackendUnavailable => "MODEL_BACKEND_UNAVAILABLE",
            AppError::BackendTimeout(_) => "BACKEND_TIMEOUT",
            AppError::ExtractionFailed { method, .. } => match method {
                ExtractMethod::Deterministic => "DETERMINISTIC_PARSING_FAILED",
                ExtractMethod::ModelBacked => "MODEL_PARSING_FAILED",
            },
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ResultNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidMethod(_)
            | AppError::InvalidFileType(_)
            | AppError::MissingFilename
            | AppError::EmptyFile
            | AppError::BatchSizeExceeded { .. } => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::EmptyExtraction => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BackendTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ExtractionFailed { .. }
            | AppError::Storage(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to clients. 5xx variants get a generic message;
    /// the full detail is logged at the response boundary instead.
    pub(crate) fn client_message(&self) -> String {
        match self {
            AppError::ExtractionFailed { method, .. } => {
                format!("{method} extraction failed while processing the file")
            }
            AppError::Storage(_) => "A storage error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::RateLimited { retry_after_secs } => {
                format!("Rate limit exceeded. Try again in {retry_after_secs} seconds")
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!("{code}: {self:?}");
        }

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": self.client_message()
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));

        let mut response = (status, body).into_response();

        if let AppError::RateLimited { retry_after_secs } = &self {
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::ResultNotFound("req_x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::FileTooLarge { size_bytes: 11 << 20 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(AppError::EmptyExtraction.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::RateLimited { retry_after_secs: 300 }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AppError::BackendUnavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::BackendTimeout(120).status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_extraction_failure_codes_follow_method() {
        let deterministic = AppError::ExtractionFailed {
            method: ExtractMethod::Deterministic,
            message: "boom".into(),
        };
        let model = AppError::ExtractionFailed {
            method: ExtractMethod::ModelBacked,
            message: "boom".into(),
        };
        assert_eq!(deterministic.error_code(), "DETERMINISTIC_PARSING_FAILED");
        assert_eq!(model.error_code(), "MODEL_PARSING_FAILED");
    }

    #[test]
    fn test_server_errors_hide_detail_from_clients() {
        let err = AppError::Storage("disk on fire at /results".into());
        assert_eq!(err.client_message(), "A storage error occurred");
    }

    #[test]
    fn test_rate_limited_response_has_retry_after_header() {
        let response = AppError::RateLimited { retry_after_secs: 300 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok()),
            Some("300")
        );
    }
}
