//! Text decoding for uploaded files.
//!
//! PDF decoding runs on the blocking pool (`pdf-extract` is CPU-bound);
//! plain text is read directly. DOCX/DOC pass upload validation but have
//! no local decoder, so they surface `DecodeError::Unsupported`.

use std::path::Path;

use thiserror::Error;

/// Extensions accepted at upload validation, lowercase without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext)
}

/// Derives the lowercase extension from a filename, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no decoder for .{0} files")]
    Unsupported(String),

    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("decoding PDF: {0}")]
    Pdf(String),
}

/// Extracts raw text from the spooled upload at `path`.
pub async fn decode_file(path: &Path, extension: &str) -> Result<String, DecodeError> {
    match extension {
        "pdf" => {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text(&path).map_err(|e| DecodeError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| DecodeError::Pdf(format!("decode task failed: {e}")))?
        }
        "txt" => Ok(tokio::fs::read_to_string(path).await?),
        other => Err(DecodeError::Unsupported(other.to_string())),
    }
}
