//! Batch coordination for `/parse-batch`.
//!
//! The whole batch is validated before any file is processed: a size or
//! name/type problem rejects the request without a single backend call.
//! Once processing starts, files run strictly sequentially and failures
//! are isolated to their own result record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::MAX_BATCH_SIZE;
use crate::errors::AppError;
use crate::extraction::ExtractMethod;
use crate::models::ResumeData;
use crate::parse::pipeline::process_upload;
use crate::parse::upload::{validate, validate_name_and_type, RawUpload};
use crate::state::AppState;

/// One per-file outcome. The `status` tag distinguishes the two shapes.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItem {
    Success {
        filename: String,
        request_id: String,
        data: ResumeData,
        processing_time: f64,
        cached: bool,
    },
    Error {
        filename: String,
        error_code: &'static str,
        error_message: String,
        http_status: u16,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
    pub timestamp: DateTime<Utc>,
}

pub async fn run(
    state: &AppState,
    files: Vec<RawUpload>,
    method: ExtractMethod,
) -> Result<BatchResponse, AppError> {
    if files.len() > MAX_BATCH_SIZE {
        return Err(AppError::BatchSizeExceeded {
            got: files.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    // Whole-batch pre-check: any bad filename or extension rejects the
    // batch before the first backend call.
    for raw in &files {
        validate_name_and_type(raw)?;
    }

    let total_files = files.len();
    info!(total_files, method = %method, "Processing batch");

    let mut results = Vec::with_capacity(total_files);
    let mut successful = 0usize;

    for raw in files {
        let filename = raw
            .filename
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();

        let item = match process_one(state, raw, method).await {
            Ok(item) => {
                successful += 1;
                item
            }
            Err(e) => BatchItem::Error {
                filename,
                error_code: e.error_code(),
                error_message: e.client_message(),
                http_status: e.status().as_u16(),
            },
        };
        results.push(item);
    }

    let failed = total_files - successful;
    Ok(BatchResponse {
        success: successful > 0,
        message: format!("Processed {successful} of {total_files} files"),
        results,
        summary: BatchSummary {
            total_files,
            successful,
            failed,
        },
        timestamp: Utc::now(),
    })
}

async fn process_one(
    state: &AppState,
    raw: RawUpload,
    method: ExtractMethod,
) -> Result<BatchItem, AppError> {
    let upload = validate(raw)?;
    let filename = upload.filename.clone();
    let parsed = process_upload(state, upload, method, true).await?;
    Ok(BatchItem::Success {
        filename,
        request_id: parsed.metadata.request_id,
        data: parsed.data,
        processing_time: parsed.metadata.total_time,
        cached: parsed.metadata.cached,
    })
}
