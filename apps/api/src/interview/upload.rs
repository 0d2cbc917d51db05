//! Resume upload decoding: `.txt` as UTF-8, `.pdf` through `pdf-extract`.
//! Everything downstream sees plain text only.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Text,
    Pdf,
}

/// Picks the format from the file extension, falling back to the part's
/// content type when the client sent no file name.
pub fn detect_format(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<ResumeFormat, AppError> {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match (extension.as_deref(), content_type) {
        (Some("txt"), _) => Ok(ResumeFormat::Text),
        (Some("pdf"), _) => Ok(ResumeFormat::Pdf),
        (None, Some(ct)) if ct.starts_with("text/plain") => Ok(ResumeFormat::Text),
        (None, Some("application/pdf")) => Ok(ResumeFormat::Pdf),
        _ => Err(AppError::Validation(
            "Only .txt or .pdf resume files are allowed".to_string(),
        )),
    }
}

/// Decodes the uploaded bytes into resume text.
///
/// PDF extraction is CPU-bound and runs on the blocking pool; a panic inside
/// the extractor surfaces as a validation error for that upload only.
pub async fn decode_resume(format: ResumeFormat, data: Bytes) -> Result<String, AppError> {
    let text = match format {
        ResumeFormat::Text => String::from_utf8_lossy(&data).into_owned(),
        ResumeFormat::Pdf => {
            let extracted =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                    .await
                    .map_err(|e| {
                        warn!("PDF extraction task failed: {e}");
                        AppError::Validation("Could not read the PDF file".to_string())
                    })?;
            extracted.map_err(|e| {
                AppError::Validation(format!("Could not extract text from the PDF file: {e}"))
            })?
        }
    };

    debug!("Decoded {:?} resume: {} chars", format, text.chars().count());
    Ok(text)
}
