//! Core library for French passport field extraction.
//!
//! This crate provides:
//! - Document intake (image or PDF) and the page renderer / OCR seams
//! - Loading of recorded OCR output (native or Google Vision JSON)
//! - MRZ decoding with a visual-zone fallback
//! - Confidence scoring, validation and per-page result aggregation

pub mod document;
pub mod error;
pub mod models;
pub mod ocr;
pub mod passport;

pub use document::{DocumentKind, PageImage, PageRenderer};
pub use error::{DocumentError, OcrError, PageError, PasscanError, Result};
pub use models::config::PasscanConfig;
pub use models::passport::{DocumentResult, ExtractedFields, PageOutcome, PassportRecord};
pub use ocr::{load_ocr_dump, OcrDocument, OcrProvider, OcrWord, PageInput, RawOcrPage};
pub use passport::{ConfidenceScorer, DocumentProcessor, PageProcessor, PassportExtractor};
