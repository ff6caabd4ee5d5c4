//! Extraction backends.
//!
//! Both backends take decoded résumé text and produce the same normalized
//! `ResumeData`; they differ only in how. `HeuristicBackend` is always
//! available; `ModelBackend` depends on an external model server whose
//! availability is probed once at startup. There is no silent fallback
//! between them.

pub mod heuristic;
pub mod model;
pub mod prompts;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ResumeData;

pub use heuristic::HeuristicBackend;
pub use model::ModelBackend;

/// Which extraction backend a request names. Wire values are
/// `deterministic` and `modelBacked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractMethod {
    Deterministic,
    ModelBacked,
}

impl ExtractMethod {
    /// Parses the multipart `method` field. Unknown values are a caller
    /// error, reported with the accepted spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deterministic" => Some(ExtractMethod::Deterministic),
            "modelBacked" => Some(ExtractMethod::ModelBacked),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMethod::Deterministic => f.write_str("deterministic"),
            ExtractMethod::ModelBacked => f.write_str("modelBacked"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("backend is not available")]
    Unavailable,

    #[error("extraction timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Failed(String),
}

/// A résumé-text extraction strategy.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    fn method(&self) -> ExtractMethod;

    async fn extract(&self, text: &str) -> Result<ResumeData, ExtractionError>;
}
