//! Single-file parse pipeline: hash, cache lookup, spool, dispatch,
//! persist, cache fill.
//!
//! The cache is keyed by content hash alone, so the same bytes uploaded
//! under a different filename are served from cache. A hit still gets a
//! fresh request id and, when asked, its own persisted record.

use chrono::Utc;
use tracing::{info, warn};

use crate::cache::ContentHash;
use crate::errors::AppError;
use crate::extraction::ExtractMethod;
use crate::models::{ParsedResume, PersistedRecord, ProcessingMetadata};
use crate::parse::upload::UploadedFile;
use crate::state::AppState;
use crate::tracking::{generate_request_id, Stopwatch};

pub async fn process_upload(
    state: &AppState,
    upload: UploadedFile,
    method: ExtractMethod,
    persist: bool,
) -> Result<ParsedResume, AppError> {
    let mut watch = Stopwatch::start();
    let request_id = generate_request_id();
    let hash = ContentHash::of(&upload.bytes);

    if let Some(mut parsed) = state.cache.get(&hash) {
        info!(
            request_id = %request_id,
            content_hash = hash.short(),
            filename = %upload.filename,
            "Serving parse result from cache"
        );
        parsed.metadata.request_id = request_id.clone();
        parsed.metadata.cached = true;
        parsed.metadata.processed_at = Utc::now();
        if persist {
            persist_record(state, &request_id, &upload.filename, method, &parsed).await;
        }
        return Ok(parsed);
    }

    if !state.dispatcher.backend_available(method) {
        return Err(AppError::BackendUnavailable);
    }

    let temp = tempfile::NamedTempFile::new()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("creating temp file: {e}")))?;
    tokio::fs::write(temp.path(), &upload.bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spooling upload: {e}")))?;

    let outcome = state
        .dispatcher
        .dispatch(temp.path(), &upload.extension, method)
        .await?;

    let mut parsed = ParsedResume {
        data: outcome.data,
        metadata: ProcessingMetadata {
            processing_method: method,
            total_time: 0.0,
            read_time: outcome.read_time,
            extract_time: outcome.extract_time,
            save_time: 0.0,
            text_length: outcome.text_length,
            file_size: upload.size(),
            processed_at: Utc::now(),
            request_id: request_id.clone(),
            cached: false,
            content_hash: hash.as_str().to_string(),
        },
    };

    if persist {
        let mut save_watch = Stopwatch::start();
        persist_record(state, &request_id, &upload.filename, method, &parsed).await;
        parsed.metadata.save_time = save_watch.lap();
    }
    parsed.metadata.total_time = watch.total();

    state.cache.put(hash, parsed.clone());

    info!(
        request_id = %request_id,
        method = %method,
        filename = %upload.filename,
        total_time = parsed.metadata.total_time,
        "Parse complete"
    );
    Ok(parsed)
}

/// Persist failures are logged and swallowed: the parse itself succeeded
/// and the client still gets its result.
async fn persist_record(
    state: &AppState,
    request_id: &str,
    filename: &str,
    method: ExtractMethod,
    parsed: &ParsedResume,
) {
    let record = PersistedRecord {
        request_id: request_id.to_string(),
        filename: filename.to_string(),
        method,
        data: parsed.data.clone(),
        metadata: parsed.metadata.clone(),
    };
    if let Err(e) = state.store.persist(&record).await {
        warn!(request_id = %request_id, "Failed to persist parse result: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::parse::upload::UploadedFile;
    use crate::state::AppState;

    const RESUME: &str = "Jane Doe\nEmail: jane.doe@example.com\nPhone: +1 555-123-4567";

    fn txt_upload(filename: &str, contents: &str) -> UploadedFile {
        UploadedFile {
            filename: filename.to_string(),
            extension: "txt".to_string(),
            bytes: Bytes::copy_from_slice(contents.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_process_upload_deterministic() {
        let state = AppState::for_tests().await;
        let parsed = process_upload(
            &state,
            txt_upload("resume.txt", RESUME),
            ExtractMethod::Deterministic,
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            parsed.data.contact_information.email.as_deref(),
            Some("jane.doe@example.com")
        );
        assert!(!parsed.metadata.cached);
        assert!(parsed.metadata.request_id.starts_with("req_"));
        assert_eq!(parsed.metadata.file_size, RESUME.len());
    }

    #[tokio::test]
    async fn test_same_bytes_different_filename_hits_cache() {
        let state = AppState::for_tests().await;
        let first = process_upload(
            &state,
            txt_upload("a.txt", RESUME),
            ExtractMethod::Deterministic,
            false,
        )
        .await
        .unwrap();
        let second = process_upload(
            &state,
            txt_upload("b.txt", RESUME),
            ExtractMethod::Deterministic,
            false,
        )
        .await
        .unwrap();

        assert!(!first.metadata.cached);
        assert!(second.metadata.cached);
        assert_ne!(first.metadata.request_id, second.metadata.request_id);
        assert_eq!(first.metadata.content_hash, second.metadata.content_hash);
        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_persisted_result_is_retrievable() {
        let state = AppState::for_tests().await;
        let parsed = process_upload(
            &state,
            txt_upload("resume.txt", RESUME),
            ExtractMethod::Deterministic,
            true,
        )
        .await
        .unwrap();

        let record = state.store.retrieve(&parsed.metadata.request_id).await.unwrap();
        assert_eq!(record.filename, "resume.txt");
        assert_eq!(record.data, parsed.data);
    }

    #[tokio::test]
    async fn test_model_backed_without_server_is_unavailable() {
        let state = AppState::for_tests().await;
        let err = process_upload(
            &state,
            txt_upload("resume.txt", RESUME),
            ExtractMethod::ModelBacked,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BackendUnavailable));
    }
}
