//! Tolerant date parsing for noisy OCR fragments.

use chrono::NaiveDate;

use super::patterns::DATE_LOOSE;
use super::FieldExtractor;

/// Clean a noisy date fragment and parse it as `DD MM YYYY`.
///
/// Dots and commas become spaces, every other non-digit non-space character
/// is dropped, whitespace is collapsed. Returns `None` when the result is not
/// exactly three space-separated numbers forming a valid calendar date.
pub fn clean_date(fragment: &str) -> Option<NaiveDate> {
    let cleaned: String = fragment
        .chars()
        .map(|c| if c == '.' || c == ',' { ' ' } else { c })
        .filter(|c| c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    if !(1..=2).contains(&day.len()) || !(1..=2).contains(&month.len()) || year.len() != 4 {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Date extractor over normalized page text.
///
/// `extract_all` yields every distinct parseable date, oldest first.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut dates: Vec<NaiveDate> = DATE_LOOSE
            .find_iter(text)
            .filter_map(|m| clean_date(m.as_str()))
            .collect();

        dates.sort();
        dates.dedup();
        dates
    }
}

/// Pick the issue date: the earliest date that is neither the birth date nor
/// the expiration date.
pub fn pick_delivery_date(
    dates: &[NaiveDate],
    birth_date: Option<NaiveDate>,
    expiration_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
    dates
        .iter()
        .copied()
        .find(|d| Some(*d) != birth_date && Some(*d) != expiration_date)
}
