//! Document text extraction for uploaded resumes and job descriptions.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type for '{0}': only PDF and TXT files are supported")]
    UnsupportedFileType(String),

    #[error("Could not read PDF '{filename}': {message}")]
    Pdf { filename: String, message: String },

    #[error("'{0}' is not valid UTF-8 text")]
    InvalidUtf8(String),

    #[error("Could not extract text from '{0}'")]
    Empty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Picks the extractor from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// Extracts plain text from an uploaded document.
///
/// PDF parsing is CPU-bound; async callers should run this on a blocking thread.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match DocumentKind::from_filename(filename)? {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf {
                filename: filename.to_string(),
                message: e.to_string(),
            })?
        }
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|_| ExtractionError::InvalidUtf8(filename.to_string()))?,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty(filename.to_string()));
    }

    debug!("Extracted {} chars from {filename}", text.len());
    Ok(text.to_string())
}
