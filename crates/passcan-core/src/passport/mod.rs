//! French passport field extraction.

mod pipeline;
pub mod rules;
mod scoring;
mod validator;

pub use pipeline::{DocumentProcessor, PageProcessor};
pub use scoring::{target_tokens, ConfidenceScorer};
pub use validator::validate;

use crate::error::PageError;
use crate::models::passport::PassportRecord;
use crate::ocr::RawOcrPage;

/// Result type for per-page extraction.
pub type Result<T> = std::result::Result<T, PageError>;

/// Trait for passport extractors.
pub trait PassportExtractor {
    /// Extract a validated passport record from one OCR page.
    fn extract(&self, page: &RawOcrPage) -> Result<PassportRecord>;
}
