//! Per-page pipeline and document-level aggregation.
//!
//! A page goes through normalize → MRZ decode → visual-zone fallback → score →
//! validate and ends as exactly one [`PageOutcome`]. A failing page never
//! affects the others.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, error, info, trace, warn};

use super::rules::{normalize_text, MrzDecoder, VisualZoneExtractor};
use super::scoring::{target_tokens, ConfidenceScorer};
use super::validator::validate;
use super::{PassportExtractor, Result};
use crate::document::{DocumentKind, PageImage, PageRenderer};
use crate::error::{DocumentError, OcrError, PageError};
use crate::models::config::{ExtractionConfig, PasscanConfig};
use crate::models::passport::{DocumentResult, ExtractedFields, PageOutcome, PassportRecord};
use crate::ocr::{OcrProvider, PageInput, RawOcrPage};

/// Runs one page through the extraction pipeline.
#[derive(Debug, Clone)]
pub struct PageProcessor {
    decoder: MrzDecoder,
    scorer: ConfidenceScorer,
}

impl PageProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self {
            decoder: MrzDecoder::new(),
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Create a processor from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let decoder = match config.reference_year {
            Some(year) => MrzDecoder::new().with_reference_year(year),
            None => MrzDecoder::new(),
        };

        Self {
            decoder,
            scorer: ConfidenceScorer::new().with_rounding(config.round_confidence),
        }
    }

    /// Set the MRZ decoder.
    pub fn with_decoder(mut self, decoder: MrzDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Set the confidence scorer.
    pub fn with_scorer(mut self, scorer: ConfidenceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Decode and score a page without validating it.
    pub fn extract_fields(&self, page: &RawOcrPage) -> ExtractedFields {
        let text = normalize_text(&page.full_text);
        trace!("Normalized {} chars of page text", text.len());

        let mut fields = self.decoder.decode(&text);
        trace!("MRZ decoded {} fields", fields.decoded_count());

        VisualZoneExtractor::new().extract_into(&text, &mut fields);
        trace!("{} fields after visual-zone fallback", fields.decoded_count());

        trace!("{} target tokens for scoring", target_tokens(&fields).len());
        fields.confidence_score = self.scorer.score(&fields, &page.words);
        fields
    }
}

impl Default for PageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PassportExtractor for PageProcessor {
    fn extract(&self, page: &RawOcrPage) -> Result<PassportRecord> {
        let fields = self.extract_fields(page);

        debug!(
            "Decoded {} fields, nationality {:?}, confidence {:.4}",
            fields.decoded_count(),
            fields.nationality,
            fields.confidence_score
        );

        validate(fields)
    }
}

/// Drives every page of a document and collects the ordered outcomes.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    pages: PageProcessor,
    parallel: bool,
}

impl DocumentProcessor {
    /// Create a sequential processor with default settings.
    pub fn new() -> Self {
        Self {
            pages: PageProcessor::new(),
            parallel: false,
        }
    }

    /// Create a processor from configuration.
    pub fn from_config(config: &PasscanConfig) -> Self {
        Self {
            pages: PageProcessor::from_config(&config.extraction),
            parallel: config.pipeline.parallel,
        }
    }

    /// Set the page processor.
    pub fn with_page_processor(mut self, pages: PageProcessor) -> Self {
        self.pages = pages;
        self
    }

    /// Decode pages on the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process one page into its terminal outcome.
    ///
    /// OCR failures and panics inside the pipeline become `Failure` outcomes.
    pub fn process_page(&self, page_number: u32, input: std::result::Result<RawOcrPage, OcrError>) -> PageOutcome {
        let start = Instant::now();
        debug!("Processing page {}", page_number);

        let result = input
            .map_err(PageError::from)
            .and_then(|page| extract_guarded(&self.pages, page_number, &page));

        match result {
            Ok(record) => {
                debug!(
                    "Page {} accepted in {}ms (passport {})",
                    page_number,
                    start.elapsed().as_millis(),
                    record.passport_number()
                );
                PageOutcome::Success { page_number, record }
            }
            Err(reason) => {
                warn!("Page {} rejected: {}", page_number, reason);
                PageOutcome::Failure {
                    page_number,
                    reason: reason.to_string(),
                }
            }
        }
    }

    /// Process already-recognized pages.
    ///
    /// Returns one outcome per input page, ordered by page number.
    pub fn process_pages<I>(&self, pages: I) -> DocumentResult
    where
        I: IntoIterator<Item = PageInput>,
    {
        let start = Instant::now();
        let pages: Vec<PageInput> = pages.into_iter().collect();

        info!("Processing {} pages", pages.len());

        let outcomes = self.run_pages(pages);
        let result = DocumentResult::new(outcomes);

        info!(
            "Document processed in {}ms: {} accepted, {} rejected",
            start.elapsed().as_millis(),
            result.success_count(),
            result.failure_count()
        );

        result
    }

    #[cfg(feature = "parallel")]
    fn run_pages(&self, pages: Vec<PageInput>) -> Vec<PageOutcome> {
        use rayon::prelude::*;

        if self.parallel {
            pages
                .into_par_iter()
                .map(|(number, input)| self.process_page(number, input))
                .collect()
        } else {
            self.run_sequential(pages)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_pages(&self, pages: Vec<PageInput>) -> Vec<PageOutcome> {
        if self.parallel {
            debug!("Built without the parallel feature, processing pages sequentially");
        }
        self.run_sequential(pages)
    }

    fn run_sequential(&self, pages: Vec<PageInput>) -> Vec<PageOutcome> {
        pages
            .into_iter()
            .map(|(number, input)| self.process_page(number, input))
            .collect()
    }

    /// Render, recognize and process a submitted document.
    ///
    /// Container errors are fatal and returned before any page is processed.
    /// Per-page OCR errors become `Failure` outcomes.
    pub fn process_document<R, O>(
        &self,
        data: &[u8],
        kind: DocumentKind,
        renderer: &R,
        ocr: &O,
    ) -> std::result::Result<DocumentResult, DocumentError>
    where
        R: PageRenderer + ?Sized,
        O: OcrProvider + ?Sized,
    {
        let images = match kind {
            DocumentKind::Image => vec![PageImage::new(1, data.to_vec())],
            DocumentKind::Pdf => renderer.render_pages(data)?,
        };

        if images.is_empty() {
            return Err(DocumentError::NoPages);
        }

        debug!("Recognizing {} page images ({:?})", images.len(), kind);

        let inputs: Vec<PageInput> = images
            .iter()
            .map(|image| (image.number, ocr.recognize(image)))
            .collect();

        Ok(self.process_pages(inputs))
    }
}

/// Run `extractor`, turning a panic into [`PageError::Internal`].
fn extract_guarded<E>(extractor: &E, page_number: u32, page: &RawOcrPage) -> Result<PassportRecord>
where
    E: PassportExtractor + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(page))).unwrap_or_else(|_| {
        error!("Unexpected fault while decoding page {}", page_number);
        Err(PageError::Internal)
    })
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
