//! Passport data models: the per-page accumulator, the validated record and
//! the per-page / per-document outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The only nationality value a [`PassportRecord`] may carry.
pub const FRENCH_NATIONALITY: &str = "Française";

/// Fields decoded from one page, filled progressively by the MRZ decoder and
/// then the visual-zone fallback.
///
/// A field that is already set is never overwritten by a later source; use
/// [`set_once`] to write into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,

    /// Aggregate OCR confidence of the decoded identity text (0.0 - 1.0).
    pub confidence_score: f32,
}

/// Write `value` into `slot` only if `slot` is still unset.
///
/// Returns `true` if the write happened.
pub fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (slot.is_none(), value) {
        (true, Some(value)) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

impl ExtractedFields {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the decoded nationality is French.
    pub fn is_french(&self) -> bool {
        self.nationality.as_deref() == Some(FRENCH_NATIONALITY)
    }

    /// Names of mandatory fields that are still unset (or blank).
    pub fn missing_mandatory(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if is_blank(&self.passport_number) {
            missing.push("passport_number");
        }
        if is_blank(&self.last_name) {
            missing.push("last_name");
        }
        if is_blank(&self.first_name) {
            missing.push("first_name");
        }
        if self.birth_date.is_none() {
            missing.push("birth_date");
        }
        if self.expiration_date.is_none() {
            missing.push("expiration_date");
        }

        missing
    }

    /// Number of identity fields that have been decoded so far.
    pub fn decoded_count(&self) -> usize {
        [
            self.last_name.is_some(),
            self.first_name.is_some(),
            self.passport_number.is_some(),
            self.nationality.is_some(),
            self.birth_date.is_some(),
            self.delivery_date.is_some(),
            self.expiration_date.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// A validated French passport record.
///
/// Only the field validator can build one, and the nationality is always
/// [`FRENCH_NATIONALITY`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassportRecord {
    last_name: String,
    first_name: String,
    passport_number: String,
    nationality: String,
    birth_date: NaiveDate,

    /// Issue date; not mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_date: Option<NaiveDate>,

    expiration_date: NaiveDate,
    confidence_score: f32,
}

impl PassportRecord {
    pub(crate) fn new(
        last_name: String,
        first_name: String,
        passport_number: String,
        birth_date: NaiveDate,
        delivery_date: Option<NaiveDate>,
        expiration_date: NaiveDate,
        confidence_score: f32,
    ) -> Self {
        Self {
            last_name,
            first_name,
            passport_number,
            nationality: FRENCH_NATIONALITY.to_string(),
            birth_date,
            delivery_date,
            expiration_date,
            confidence_score,
        }
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn passport_number(&self) -> &str {
        &self.passport_number
    }

    /// Always [`FRENCH_NATIONALITY`].
    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.delivery_date
    }

    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Aggregate OCR confidence (0.0 - 1.0).
    pub fn confidence_score(&self) -> f32 {
        self.confidence_score
    }
}

/// Terminal outcome of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The page yielded a validated record.
    Success {
        page_number: u32,
        record: PassportRecord,
    },
    /// The page was rejected.
    Failure { page_number: u32, reason: String },
}

impl PageOutcome {
    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        match self {
            PageOutcome::Success { page_number, .. } | PageOutcome::Failure { page_number, .. } => {
                *page_number
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PageOutcome::Success { .. })
    }

    pub fn record(&self) -> Option<&PassportRecord> {
        match self {
            PageOutcome::Success { record, .. } => Some(record),
            PageOutcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            PageOutcome::Success { .. } => None,
            PageOutcome::Failure { reason, .. } => Some(reason),
        }
    }
}

/// Ordered outcomes for a whole document, one per input page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DocumentResult {
    pages: Vec<PageOutcome>,
}

impl DocumentResult {
    /// Build a result, ordering outcomes by ascending page number.
    pub fn new(mut pages: Vec<PageOutcome>) -> Self {
        pages.sort_by_key(PageOutcome::page_number);
        Self { pages }
    }

    pub fn pages(&self) -> &[PageOutcome] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageOutcome> {
        self.pages.iter()
    }

    /// Validated records in page order.
    pub fn records(&self) -> impl Iterator<Item = (u32, &PassportRecord)> {
        self.pages
            .iter()
            .filter_map(|p| p.record().map(|r| (p.page_number(), r)))
    }

    pub fn success_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    pub fn into_pages(self) -> Vec<PageOutcome> {
        self.pages
    }
}

impl<'a> IntoIterator for &'a DocumentResult {
    type Item = &'a PageOutcome;
    type IntoIter = std::slice::Iter<'a, PageOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_once_keeps_first_value() {
        let mut slot = None;
        assert!(set_once(&mut slot, Some("MARTIN".to_string())));
        assert!(!set_once(&mut slot, Some("DUPONT".to_string())));
        assert!(!set_once(&mut slot, None));
        assert_eq!(slot.as_deref(), Some("MARTIN"));
    }

    #[test]
    fn test_missing_mandatory() {
        let fields = ExtractedFields {
            last_name: Some("MARTIN".to_string()),
            first_name: Some("  ".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1985, 1, 1),
            ..Default::default()
        };

        assert_eq!(
            fields.missing_mandatory(),
            vec!["passport_number", "first_name", "expiration_date"]
        );
    }

    #[test]
    fn test_document_result_sorted_by_page() {
        let result = DocumentResult::new(vec![
            PageOutcome::Failure {
                page_number: 2,
                reason: "x".to_string(),
            },
            PageOutcome::Failure {
                page_number: 1,
                reason: "y".to_string(),
            },
        ]);

        let numbers: Vec<u32> = result.iter().map(PageOutcome::page_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(result.failure_count(), 2);
        assert_eq!(result.success_count(), 0);
    }

    #[test]
    fn test_record_is_always_french() {
        let record = PassportRecord::new(
            "MARTIN".to_string(),
            "JEAN".to_string(),
            "12AB34567".to_string(),
            NaiveDate::from_ymd_opt(1985, 1, 1).unwrap(),
            None,
            NaiveDate::from_ymd_opt(2029, 5, 12).unwrap(),
            0.9,
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(record.nationality(), FRENCH_NATIONALITY);
        assert_eq!(json["nationality"], "Française");
        assert_eq!(json["birth_date"], "1985-01-01");
        assert!(json.get("delivery_date").is_none());
    }

    #[test]
    fn test_page_outcome_serialization() {
        let outcome = PageOutcome::Failure {
            page_number: 3,
            reason: "No text could be detected in the document.".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failure");
        assert_eq!(json["page_number"], 3);
    }
}
