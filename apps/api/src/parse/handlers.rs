//! Route handlers for the parsing surface.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{MAX_BATCH_SIZE, MAX_FILE_SIZE_BYTES};
use crate::decode::SUPPORTED_EXTENSIONS;
use crate::errors::AppError;
use crate::models::{PersistedRecord, ProcessingMetadata, ResumeData};
use crate::parse::batch::{self, BatchResponse};
use crate::parse::pipeline::process_upload;
use crate::parse::upload::{read_batch_form, read_parse_form, validate};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
    pub data: ResumeData,
    pub metadata: ProcessingMetadata,
    pub timestamp: DateTime<Utc>,
}

/// POST /parse
pub async fn parse_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let result = async {
        let form = read_parse_form(multipart).await?;
        let upload = validate(form.file)?;
        process_upload(&state, upload, form.method, form.persist).await
    }
    .await;

    match result {
        Ok(parsed) => {
            state.stats.record_success();
            Ok(Json(ParseResponse {
                success: true,
                message: if parsed.metadata.cached {
                    "Resume parsed successfully (cached)".to_string()
                } else {
                    "Resume parsed successfully".to_string()
                },
                request_id: parsed.metadata.request_id.clone(),
                data: parsed.data,
                metadata: parsed.metadata,
                timestamp: Utc::now(),
            }))
        }
        Err(e) => {
            state.stats.record_failure();
            Err(e)
        }
    }
}

/// POST /parse-batch
pub async fn parse_batch_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let result = async {
        let form = read_batch_form(multipart).await?;
        batch::run(&state, form.files, form.method).await
    }
    .await;

    match result {
        Ok(response) => {
            if response.success {
                state.stats.record_success();
            } else {
                state.stats.record_failure();
            }
            Ok(Json(response))
        }
        Err(e) => {
            state.stats.record_failure();
            Err(e)
        }
    }
}

/// GET /results/:request_id
pub async fn results_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<PersistedRecord>, AppError> {
    let record = state.store.retrieve(&request_id).await?;
    Ok(Json(record))
}

/// GET /supported-formats
pub async fn supported_formats_handler(State(state): State<AppState>) -> Json<Value> {
    let policy = state.admission.policy();
    Json(json!({
        "supported_formats": SUPPORTED_EXTENSIONS,
        "max_file_size_mb": MAX_FILE_SIZE_BYTES / (1024 * 1024),
        "max_batch_size": MAX_BATCH_SIZE,
        "methods": {
            "deterministic": {
                "available": true,
                "description": "Regex and section heuristics, no model required"
            },
            "modelBacked": {
                "available": state.dispatcher.model_available(),
                "model": state.dispatcher.model_name(),
                "description": "Structured extraction via the configured model server"
            }
        },
        "rate_limit": {
            "max_requests": policy.max_requests,
            "window_seconds": policy.window.as_secs(),
            "block_seconds": policy.block_duration.as_secs()
        },
        "error_codes": [
            "RATE_LIMIT_EXCEEDED",
            "INVALID_METHOD",
            "INVALID_FILE_TYPE",
            "MISSING_FILENAME",
            "EMPTY_FILE",
            "BATCH_SIZE_EXCEEDED",
            "FILE_TOO_LARGE",
            "EMPTY_EXTRACTION",
            "MODEL_BACKEND_UNAVAILABLE",
            "BACKEND_TIMEOUT",
            "DETERMINISTIC_PARSING_FAILED",
            "MODEL_PARSING_FAILED",
            "RESULT_NOT_FOUND",
            "STORAGE_ERROR",
            "INTERNAL_ERROR"
        ],
        "timestamp": Utc::now().to_rfc3339()
    }))
}
