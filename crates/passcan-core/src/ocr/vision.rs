//! Loader for recorded OCR output.
//!
//! Accepts either this crate's own [`OcrDocument`] JSON or raw Google Cloud
//! Vision `DOCUMENT_TEXT_DETECTION` responses (single image, batch, or the
//! nested per-file form returned for PDFs).

use serde::Deserialize;

use super::{OcrDocument, OcrWord, PageInput, RawOcrPage};
use crate::error::{DocumentError, OcrError, PasscanError};

/// One Vision annotate response (one page), or a per-file response wrapping
/// several page responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,

    #[serde(default)]
    error: Option<VisionStatus>,

    /// Present on per-file (PDF) responses.
    #[serde(default)]
    responses: Vec<VisionResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct VisionStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
    #[serde(default)]
    pages: Vec<AnnotationPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AnnotationPage {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Block {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Paragraph {
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Word {
    #[serde(default)]
    symbols: Vec<Symbol>,
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Symbol {
    #[serde(default)]
    text: String,
}

impl VisionResponse {
    /// Convert one page response into pipeline input.
    pub fn into_page(self) -> Result<RawOcrPage, OcrError> {
        if let Some(status) = self.error.filter(|s| s.code != 0 || !s.message.is_empty()) {
            return Err(OcrError::Backend(format!(
                "{} (code {})",
                status.message, status.code
            )));
        }

        let annotation = match self.full_text_annotation {
            Some(annotation) if !annotation.pages.is_empty() => annotation,
            _ => return Err(OcrError::NoText),
        };

        let words = annotation
            .pages
            .into_iter()
            .flat_map(|page| page.blocks)
            .flat_map(|block| block.paragraphs)
            .flat_map(|paragraph| paragraph.words)
            .map(|word| {
                let text: String = word.symbols.into_iter().map(|s| s.text).collect();
                OcrWord::new(text, word.confidence)
            })
            .collect();

        Ok(RawOcrPage::new(annotation.text, words))
    }

    fn flatten_into(self, out: &mut Vec<VisionResponse>) {
        if self.responses.is_empty() {
            out.push(self);
        } else {
            for inner in self.responses {
                inner.flatten_into(out);
            }
        }
    }
}

/// Keys that identify each accepted top-level shape, checked in order.
const NATIVE_KEYS: &[&str] = &["pages"];
const VISION_KEYS: &[&str] = &["responses", "fullTextAnnotation", "error"];

/// Parse recorded OCR output into ordered page inputs numbered from 1.
///
/// The shape is chosen from the top-level keys. A recognized shape with bad
/// content fails with its serde error; anything else is unreadable.
pub fn load_ocr_dump(json: &str) -> Result<Vec<PageInput>, PasscanError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let has_any = |keys: &[&str]| {
        value
            .as_object()
            .is_some_and(|obj| keys.iter().any(|key| obj.contains_key(*key)))
    };

    let (is_native, is_vision) = (has_any(NATIVE_KEYS), has_any(VISION_KEYS));

    let pages: Vec<Result<RawOcrPage, OcrError>> = if is_native {
        let document: OcrDocument = serde_json::from_value(value)?;
        document
            .pages
            .into_iter()
            .map(|page| if page.is_blank() { Err(OcrError::NoText) } else { Ok(page) })
            .collect()
    } else if is_vision {
        let response: VisionResponse = serde_json::from_value(value)?;
        let mut flat = Vec::new();
        response.flatten_into(&mut flat);
        flat.into_iter().map(VisionResponse::into_page).collect()
    } else {
        return Err(DocumentError::Unreadable(
            "unrecognized OCR output: expected `pages`, `responses`, `fullTextAnnotation` or `error`"
                .to_string(),
        )
        .into());
    };

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| (i as u32 + 1, page))
        .collect())
}
