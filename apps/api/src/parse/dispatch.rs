//! Backend dispatch: decode the spooled upload, then run the chosen
//! extraction backend.
//!
//! Availability is checked before any decoding so that a request naming
//! an offline backend fails fast without touching the file.

use std::path::Path;

use crate::decode::{decode_file, DecodeError};
use crate::errors::AppError;
use crate::extraction::{
    ExtractMethod, ExtractionBackend, ExtractionError, HeuristicBackend, ModelBackend,
};
use crate::tracking::Stopwatch;

/// What dispatch produces on success, with per-stage timings in seconds.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub data: crate::models::ResumeData,
    pub read_time: f64,
    pub extract_time: f64,
    pub text_length: usize,
}

/// Holds both backends and routes a request to the one it named.
pub struct Dispatcher {
    heuristic: HeuristicBackend,
    model: ModelBackend,
}

impl Dispatcher {
    pub fn new(model: ModelBackend) -> Self {
        Self {
            heuristic: HeuristicBackend,
            model,
        }
    }

    pub fn model_available(&self) -> bool {
        self.model.is_available()
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Returns whether the named backend can serve requests right now.
    pub fn backend_available(&self, method: ExtractMethod) -> bool {
        match method {
            ExtractMethod::Deterministic => true,
            ExtractMethod::ModelBacked => self.model.is_available(),
        }
    }

    /// Decodes the file at `path` and extracts with the named backend.
    pub async fn dispatch(
        &self,
        path: &Path,
        extension: &str,
        method: ExtractMethod,
    ) -> Result<DispatchOutcome, AppError> {
        if !self.backend_available(method) {
            return Err(AppError::BackendUnavailable);
        }

        let mut watch = Stopwatch::start();

        let text = match decode_file(path, extension).await {
            Ok(text) => text,
            // No decoder, or a decoder that produced nothing usable: the
            // caller sees the same "nothing extractable" failure either way.
            Err(DecodeError::Unsupported(_)) | Err(DecodeError::Pdf(_)) => {
                return Err(AppError::EmptyExtraction);
            }
            Err(DecodeError::Io(e)) => {
                return Err(AppError::Internal(anyhow::anyhow!("reading upload: {e}")));
            }
        };
        let read_time = watch.lap();

        if text.trim().is_empty() {
            return Err(AppError::EmptyExtraction);
        }
        let text_length = text.len();

        let backend: &dyn ExtractionBackend = match method {
            ExtractMethod::Deterministic => &self.heuristic,
            ExtractMethod::ModelBacked => &self.model,
        };
        let data = backend.extract(&text).await.map_err(|e| match e {
            ExtractionError::Unavailable => AppError::BackendUnavailable,
            ExtractionError::Timeout(secs) => AppError::BackendTimeout(secs),
            ExtractionError::Failed(message) => AppError::ExtractionFailed { method, message },
        })?;
        let extract_time = watch.lap();

        Ok(DispatchOutcome {
            data,
            read_time,
            extract_time,
            text_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn offline_dispatcher() -> Dispatcher {
        Dispatcher::new(ModelBackend::offline())
    }

    fn spool(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_dispatch_deterministic_extracts_text() {
        let file = spool("Jane Doe\nEmail: jane@example.com\nPhone: +1 555-123-4567");
        let outcome = offline_dispatcher()
            .dispatch(file.path(), "txt", ExtractMethod::Deterministic)
            .await
            .unwrap();
        assert_eq!(
            outcome.data.contact_information.email.as_deref(),
            Some("jane@example.com")
        );
        assert!(outcome.text_length > 0);
        assert!(outcome.read_time >= 0.0);
        assert!(outcome.extract_time >= 0.0);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_offline_model_before_decoding() {
        let file = spool("anything");
        let err = offline_dispatcher()
            .dispatch(file.path(), "txt", ExtractMethod::ModelBacked)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BackendUnavailable));
    }

    #[tokio::test]
    async fn test_dispatch_empty_text_is_empty_extraction() {
        let file = spool("   \n\n  ");
        let err = offline_dispatcher()
            .dispatch(file.path(), "txt", ExtractMethod::Deterministic)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyExtraction));
    }

    #[tokio::test]
    async fn test_dispatch_undecodable_type_is_empty_extraction() {
        let file = spool("binary-ish");
        let err = offline_dispatcher()
            .dispatch(file.path(), "docx", ExtractMethod::Deterministic)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyExtraction));
    }
}
