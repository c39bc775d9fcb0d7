//! OCR input types and the OCR collaborator seam.
//!
//! The OCR engine itself lives outside this crate. It hands us, per page, the
//! full recognized text plus a word list with per-word confidences.

mod vision;

pub use vision::{load_ocr_dump, VisionResponse};

use serde::{Deserialize, Serialize};

use crate::document::PageImage;
use crate::error::OcrError;

/// A recognized word with its engine confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    /// Word text as recognized.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    #[serde(default)]
    pub confidence: f32,
}

impl OcrWord {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Raw OCR output for a single page. Immutable input to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOcrPage {
    /// Full recognized text, newlines included.
    #[serde(alias = "fullText")]
    pub full_text: String,

    /// Words in reading order.
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

impl RawOcrPage {
    pub fn new(full_text: impl Into<String>, words: Vec<OcrWord>) -> Self {
        Self {
            full_text: full_text.into(),
            words,
        }
    }

    /// Whether the engine found any text at all.
    pub fn is_blank(&self) -> bool {
        self.full_text.trim().is_empty() && self.words.is_empty()
    }
}

/// Recorded OCR output for a multi-page document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    pub pages: Vec<RawOcrPage>,
}

/// A page ready for the pipeline: its 1-based number and either the OCR
/// output or the collaborator's failure.
pub type PageInput = (u32, Result<RawOcrPage, OcrError>);

/// Trait for OCR backends.
pub trait OcrProvider {
    /// Recognize text on one page image.
    ///
    /// Returns [`OcrError::NoText`] when nothing was detected.
    fn recognize(&self, page: &PageImage) -> Result<RawOcrPage, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_page_accepts_camel_case_alias() {
        let page: RawOcrPage = serde_json::from_str(
            r#"{"fullText": "P<FRA", "words": [{"text": "P<FRA", "confidence": 0.9}]}"#,
        )
        .unwrap();

        assert_eq!(page.full_text, "P<FRA");
        assert_eq!(page.words, vec![OcrWord::new("P<FRA", 0.9)]);
    }

    #[test]
    fn test_missing_word_confidence_defaults_to_zero() {
        let word: OcrWord = serde_json::from_str(r#"{"text": "MARTIN"}"#).unwrap();
        assert_eq!(word.confidence, 0.0);
    }

    #[test]
    fn test_blank_page() {
        assert!(RawOcrPage::new("  \n ", vec![]).is_blank());
        assert!(!RawOcrPage::new("Nom", vec![]).is_blank());
    }
}
