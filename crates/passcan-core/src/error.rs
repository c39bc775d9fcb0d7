//! Error types for the passcan-core library.

use thiserror::Error;

/// Main error type for the passcan library.
#[derive(Error, Debug)]
pub enum PasscanError {
    /// Document-level error (fatal, raised before any page is processed).
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Malformed JSON input (recorded OCR output, configuration).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Fatal errors concerning the submitted container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The content type or file extension is not supported.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The container could not be opened or rendered.
    #[error("error reading document: {0}")]
    Unreadable(String),

    /// The document produced no pages at all.
    #[error("failed to produce any results from the uploaded file")]
    NoPages,
}

/// Errors signalled by the OCR collaborator for a single page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// The engine found no text on the page.
    #[error("no text detected")]
    NoText,

    /// The engine failed for another reason.
    #[error("OCR backend failed: {0}")]
    Backend(String),
}

/// Reason a single page was rejected.
///
/// The `Display` output is the caller-facing reason stored in
/// [`PageOutcome::Failure`](crate::models::passport::PageOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// No text was detected on the page.
    #[error("No text could be detected in the document.")]
    NoText,

    /// Nationality was not decoded as French (or not decoded at all).
    #[error("The document could not be confirmed as a French passport.")]
    NotFrench,

    /// One or more mandatory fields are unset.
    #[error("Could not automatically extract all essential passport details (missing: {}).", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The OCR collaborator failed on this page.
    #[error("Text recognition failed for this page: {0}")]
    Ocr(String),

    /// An unexpected fault while decoding the page.
    #[error("An unexpected error occurred while processing this page.")]
    Internal,
}

impl From<OcrError> for PageError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::NoText => PageError::NoText,
            OcrError::Backend(msg) => PageError::Ocr(msg),
        }
    }
}

/// Result type for the passcan library.
pub type Result<T> = std::result::Result<T, PasscanError>;
