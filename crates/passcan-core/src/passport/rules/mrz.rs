//! Machine-Readable Zone decoding for French passports.
//!
//! Check digits are not verified. The birth-date century is guessed by
//! comparing the two-digit year with the reference year's suffix: holders
//! born in 19YY with YY at or below that suffix decode into the 2000s.

use chrono::{Datelike, Local, NaiveDate};

use super::patterns::{MRZ_LINE1, MRZ_LINE2};
use super::text::strip_spaces;
use crate::models::passport::{ExtractedFields, FRENCH_NATIONALITY};

/// MRZ decoder.
#[derive(Debug, Clone)]
pub struct MrzDecoder {
    reference_year: i32,
}

impl MrzDecoder {
    /// Create a decoder using the current local year for century guessing.
    pub fn new() -> Self {
        Self {
            reference_year: Local::now().year(),
        }
    }

    /// Pin the year used for century guessing.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Decode identity fields from normalized page text.
    ///
    /// Spaces are removed before matching. Fields the MRZ does not yield stay
    /// unset; `confidence_score` is left at zero.
    pub fn decode(&self, normalized_text: &str) -> ExtractedFields {
        let mrz = strip_spaces(normalized_text);
        let mut fields = ExtractedFields::new();

        if let Some(caps) = MRZ_LINE1.captures(&mrz) {
            fields.last_name = non_empty(caps[1].replace('<', " ").trim().to_string());
            fields.first_name = caps.get(2).and_then(|given| {
                non_empty(
                    given
                        .as_str()
                        .replace('<', " ")
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            });
        }

        if let Some(caps) = MRZ_LINE2.captures(&mrz) {
            fields.nationality = Some(FRENCH_NATIONALITY.to_string());
            fields.passport_number = Some(caps[1].to_string());
            fields.birth_date = self.birth_date(&caps[2]);
            fields.expiration_date = expiration_date(&caps[3]);
        }

        fields
    }

    /// Parse a `YYMMDD` birth date, guessing the century.
    pub fn birth_date(&self, yymmdd: &str) -> Option<NaiveDate> {
        let yy: i32 = yymmdd.get(0..2)?.parse().ok()?;
        let century = birth_century(yy, self.reference_year.rem_euclid(100));
        parse_yymmdd(century, yymmdd)
    }
}

impl Default for MrzDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Century prefix for a two-digit birth year: `19` if the year is greater
/// than the reference year's suffix, `20` otherwise.
pub fn birth_century(yy: i32, reference_suffix: i32) -> i32 {
    if yy > reference_suffix { 19 } else { 20 }
}

/// Parse a `YYMMDD` expiration date, always in the 2000s.
pub fn expiration_date(yymmdd: &str) -> Option<NaiveDate> {
    parse_yymmdd(20, yymmdd)
}

fn parse_yymmdd(century: i32, yymmdd: &str) -> Option<NaiveDate> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy: i32 = yymmdd[0..2].parse().ok()?;
    let month: u32 = yymmdd[2..4].parse().ok()?;
    let day: u32 = yymmdd[4..6].parse().ok()?;

    NaiveDate::from_ymd_opt(century * 100 + yy, month, day)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
