//! Visual-zone fallback extraction.
//!
//! Each rule only fires for a field that is still unset after MRZ decoding.

use chrono::NaiveDate;

use super::dates::{pick_delivery_date, DateExtractor};
use super::patterns::{GIVEN_NAMES_LABEL, NATIONALITY_LABEL, PASSPORT_NUMBER, SURNAME_LABEL};
use super::FieldExtractor;
use crate::models::passport::{set_once, ExtractedFields, FRENCH_NATIONALITY};

/// Label- and pattern-based extractor for the human-readable zone.
pub struct VisualZoneExtractor {
    dates: DateExtractor,
}

impl VisualZoneExtractor {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
        }
    }

    /// Fill the unset fields of `fields` from normalized page text.
    pub fn extract_into(&self, text: &str, fields: &mut ExtractedFields) {
        if fields.passport_number.is_none() {
            set_once(&mut fields.passport_number, extract_passport_number(text));
        }
        if fields.last_name.is_none() {
            set_once(&mut fields.last_name, extract_surname(text));
        }
        if fields.first_name.is_none() {
            set_once(&mut fields.first_name, extract_given_names(text));
        }

        split_combined_name(fields);

        if fields.nationality.is_none() {
            set_once(&mut fields.nationality, extract_nationality(text));
        }
        if fields.delivery_date.is_none() {
            fields.delivery_date = self.delivery_date(text, fields.birth_date, fields.expiration_date);
        }
    }

    /// Earliest date in the text that is neither the birth nor the expiration date.
    pub fn delivery_date(
        &self,
        text: &str,
        birth_date: Option<NaiveDate>,
        expiration_date: Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        let dates = self.dates.extract_all(text);
        pick_delivery_date(&dates, birth_date, expiration_date)
    }
}

impl Default for VisualZoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First standalone `99XX99999` token.
pub fn extract_passport_number(text: &str) -> Option<String> {
    PASSPORT_NUMBER.captures(text).map(|caps| caps[1].to_string())
}

pub fn extract_surname(text: &str) -> Option<String> {
    SURNAME_LABEL
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn extract_given_names(text: &str) -> Option<String> {
    GIVEN_NAMES_LABEL
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// French nationality from its label, or `None` for any other value.
pub fn extract_nationality(text: &str) -> Option<String> {
    NATIONALITY_LABEL
        .captures(text)
        .filter(|caps| caps[1].to_lowercase().contains("française"))
        .map(|_| FRENCH_NATIONALITY.to_string())
}

/// When only a multi-word surname was recovered, keep its first word as the
/// surname and move the rest into the given names.
pub fn split_combined_name(fields: &mut ExtractedFields) {
    if fields.first_name.is_some() {
        return;
    }
    let Some(name) = fields.last_name.as_deref() else {
        return;
    };

    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() < 2 {
        return;
    }

    let (surname, given) = (parts[0].to_string(), parts[1..].join(" "));
    fields.last_name = Some(surname);
    fields.first_name = Some(given);
}
