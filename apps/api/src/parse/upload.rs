//! Multipart intake and upload validation.
//!
//! Validation order follows the response contract: filename, then file
//! type, then size, then emptiness. The batch coordinator re-uses the
//! name/type half for its eager pre-check.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::config::MAX_FILE_SIZE_BYTES;
use crate::decode::{extension_of, is_supported_extension, SUPPORTED_EXTENSIONS};
use crate::errors::AppError;
use crate::extraction::ExtractMethod;

/// One file part as it arrived, before validation.
pub struct RawUpload {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// A validated upload ready for the pipeline.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub extension: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// The `/parse` form: one `file`, a required `method`, optional `persist`.
pub struct ParseForm {
    pub file: RawUpload,
    pub method: ExtractMethod,
    pub persist: bool,
}

/// The `/parse-batch` form: repeated `files` plus a required `method`.
pub struct BatchForm {
    pub files: Vec<RawUpload>,
    pub method: ExtractMethod,
}

pub async fn read_parse_form(mut multipart: Multipart) -> Result<ParseForm, AppError> {
    let mut file: Option<RawUpload> = None;
    let mut method: Option<String> = None;
    let mut persist = true;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("reading multipart field: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("reading upload: {e}")))?;
                file = Some(RawUpload { filename, bytes });
            }
            Some("method") => {
                method = Some(read_text_field(field).await?);
            }
            Some("persist") => {
                persist = read_text_field(field).await?.trim() != "false";
            }
            _ => {}
        }
    }

    Ok(ParseForm {
        file: file.ok_or(AppError::MissingFilename)?,
        method: parse_method(method)?,
        persist,
    })
}

pub async fn read_batch_form(mut multipart: Multipart) -> Result<BatchForm, AppError> {
    let mut files = Vec::new();
    let mut method: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("reading multipart field: {e}")))?
    {
        match field.name() {
            Some("files") => {
                let filename = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("reading upload: {e}")))?;
                files.push(RawUpload { filename, bytes });
            }
            Some("method") => {
                method = Some(read_text_field(field).await?);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::MissingFilename);
    }

    Ok(BatchForm {
        files,
        method: parse_method(method)?,
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("reading multipart field: {e}")))
}

fn parse_method(value: Option<String>) -> Result<ExtractMethod, AppError> {
    let value = value.ok_or_else(|| {
        AppError::InvalidMethod("expected 'deterministic' or 'modelBacked', got nothing".into())
    })?;
    ExtractMethod::parse(value.trim()).ok_or_else(|| {
        AppError::InvalidMethod(format!(
            "expected 'deterministic' or 'modelBacked', got '{}'",
            value.trim()
        ))
    })
}

/// Filename and extension checks, shared with the batch pre-check.
pub fn validate_name_and_type(raw: &RawUpload) -> Result<(String, String), AppError> {
    let filename = raw
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or(AppError::MissingFilename)?
        .to_string();

    let extension = extension_of(&filename).ok_or_else(|| {
        AppError::InvalidFileType(format!(
            "'{filename}' has no extension; supported: {}",
            SUPPORTED_EXTENSIONS.join(", ")
        ))
    })?;
    if !is_supported_extension(&extension) {
        return Err(AppError::InvalidFileType(format!(
            ".{extension} (supported: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    Ok((filename, extension))
}

/// Full validation: name, type, size, emptiness, in that order.
pub fn validate(raw: RawUpload) -> Result<UploadedFile, AppError> {
    let (filename, extension) = validate_name_and_type(&raw)?;

    if raw.bytes.len() > MAX_FILE_SIZE_BYTES {
        return Err(AppError::FileTooLarge {
            size_bytes: raw.bytes.len(),
        });
    }
    if raw.bytes.is_empty() {
        return Err(AppError::EmptyFile);
    }

    Ok(UploadedFile {
        filename,
        extension,
        bytes: raw.bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_raw(filename: Option<&str>, bytes: &[u8]) -> RawUpload {
        RawUpload {
            filename: filename.map(|s| s.to_string()),
            bytes: Bytes::copy_from_slice(bytes),
        }
    }

    #[test]
    fn test_validate_accepts_supported_upload() {
        let upload = validate(make_raw(Some("resume.pdf"), b"%PDF-1.4")).unwrap();
        assert_eq!(upload.filename, "resume.pdf");
        assert_eq!(upload.extension, "pdf");
        assert_eq!(upload.size(), 8);
    }

    #[test]
    fn test_validate_rejects_missing_filename() {
        assert!(matches!(
            validate(make_raw(None, b"data")),
            Err(AppError::MissingFilename)
        ));
        assert!(matches!(
            validate(make_raw(Some("   "), b"data")),
            Err(AppError::MissingFilename)
        ));
    }

    #[test]
    fn test_validate_rejects_unsupported_extension() {
        assert!(matches!(
            validate(make_raw(Some("malware.exe"), b"data")),
            Err(AppError::InvalidFileType(_))
        ));
        assert!(matches!(
            validate(make_raw(Some("noextension"), b"data")),
            Err(AppError::InvalidFileType(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let big = vec![0u8; MAX_FILE_SIZE_BYTES + 1];
        match validate(make_raw(Some("big.pdf"), &big)) {
            Err(AppError::FileTooLarge { size_bytes }) => {
                assert_eq!(size_bytes, MAX_FILE_SIZE_BYTES + 1);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        assert!(matches!(
            validate(make_raw(Some("empty.pdf"), b"")),
            Err(AppError::EmptyFile)
        ));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let upload = validate(make_raw(Some("Resume.PDF"), b"x")).unwrap();
        assert_eq!(upload.extension, "pdf");
    }

    #[test]
    fn test_parse_method_rejects_unknown_value() {
        assert!(matches!(
            parse_method(Some("auto".into())),
            Err(AppError::InvalidMethod(_))
        ));
        assert!(matches!(parse_method(None), Err(AppError::InvalidMethod(_))));
        assert_eq!(
            parse_method(Some("modelBacked".into())).unwrap(),
            ExtractMethod::ModelBacked
        );
    }
}
