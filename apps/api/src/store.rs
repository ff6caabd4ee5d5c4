//! Result persistence: one JSON file per request id plus an in-memory index
//! for O(1) retrieval. The index is rebuilt from the directory listing at
//! startup so records persisted by earlier runs stay addressable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::PersistedRecord;

pub struct ResultStore {
    results_dir: PathBuf,
    index: RwLock<HashMap<String, PathBuf>>,
}

impl ResultStore {
    /// Opens the store, creating the results directory if needed and
    /// indexing any records already on disk.
    pub async fn open(results_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let results_dir = results_dir.into();
        tokio::fs::create_dir_all(&results_dir)
            .await
            .with_context(|| format!("creating results directory {}", results_dir.display()))?;

        let index = rebuild_index(&results_dir).await?;
        info!(
            records = index.len(),
            dir = %results_dir.display(),
            "result store opened"
        );

        Ok(Self {
            results_dir,
            index: RwLock::new(index),
        })
    }

    /// Writes the record and registers it in the index.
    pub async fn persist(&self, record: &PersistedRecord) -> Result<(), AppError> {
        let path = self.results_dir.join(format!("{}.json", record.request_id));
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| AppError::Storage(format!("serializing result: {e}")))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AppError::Storage(format!("writing {}: {e}", path.display())))?;

        let mut index = self
            .index
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        index.insert(record.request_id.clone(), path);
        Ok(())
    }

    /// Index lookup plus file read. No directory scan.
    pub async fn retrieve(&self, request_id: &str) -> Result<PersistedRecord, AppError> {
        let path = {
            let index = self
                .index
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            index
                .get(request_id)
                .cloned()
                .ok_or_else(|| AppError::ResultNotFound(request_id.to_string()))?
        };

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            warn!(request_id, path = %path.display(), "indexed result missing on disk: {e}");
            AppError::ResultNotFound(request_id.to_string())
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("decoding {}: {e}", path.display())))
    }

    pub fn len(&self) -> usize {
        self.index
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

/// Scans the results directory and maps each `{request_id}.json` to its path.
async fn rebuild_index(dir: &Path) -> anyhow::Result<HashMap<String, PathBuf>> {
    let mut index = HashMap::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("listing {}", dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index.insert(stem.to_string(), path.clone());
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractMethod;
    use crate::models::{ProcessingMetadata, ResumeData};
    use chrono::Utc;

    fn make_record(request_id: &str) -> PersistedRecord {
        PersistedRecord {
            request_id: request_id.to_string(),
            filename: "resume.pdf".into(),
            method: ExtractMethod::Deterministic,
            data: ResumeData {
                ats_score: 70,
                ..Default::default()
            },
            metadata: ProcessingMetadata {
                processing_method: ExtractMethod::Deterministic,
                total_time: 0.5,
                read_time: 0.2,
                extract_time: 0.2,
                save_time: 0.1,
                text_length: 900,
                file_size: 2048,
                processed_at: Utc::now(),
                request_id: request_id.to_string(),
                cached: false,
                content_hash: "cd".repeat(32),
            },
        }
    }

    #[tokio::test]
    async fn test_persist_then_retrieve_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path()).await.unwrap();

        store.persist(&make_record("req_abc123_1")).await.unwrap();
        let back = store.retrieve("req_abc123_1").await.unwrap();
        assert_eq!(back.request_id, "req_abc123_1");
        assert_eq!(back.data.ats_score, 70);
    }

    #[tokio::test]
    async fn test_unknown_request_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path()).await.unwrap();

        match store.retrieve("req_missing_0").await {
            Err(AppError::ResultNotFound(id)) => assert_eq!(id, "req_missing_0"),
            other => panic!("expected ResultNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_index_rebuild_spans_restarts() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = ResultStore::open(dir.path()).await.unwrap();
            store.persist(&make_record("req_old_1")).await.unwrap();
        }

        // A fresh store over the same directory must index the old record.
        let reopened = ResultStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.len(), 1);
        let back = reopened.retrieve("req_old_1").await.unwrap();
        assert_eq!(back.filename, "resume.pdf");
    }

    #[tokio::test]
    async fn test_non_json_files_are_ignored_by_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), b"scratch")
            .await
            .unwrap();
        let store = ResultStore::open(dir.path()).await.unwrap();
        assert_eq!(store.len(), 0);
    }
}
