//! Common regex patterns for French passport extraction.
//!
//! The visual-zone label patterns run against normalized text, where slashes
//! and newlines have already been turned into single spaces.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // MRZ line 1: document code, issuing state, surname << given names.
    // Given names may be absent. Runs on text with every space removed.
    pub static ref MRZ_LINE1: Regex = Regex::new(
        r"P<FRA([A-Z]+(?:<[A-Z]+)*)<<([A-Z]+(?:<[A-Z]+)*)?"
    ).unwrap();

    // MRZ line 2: number, optional filler + check digit, FRA, birth YYMMDD,
    // check digit or filler, sex, expiry YYMMDD.
    pub static ref MRZ_LINE2: Regex = Regex::new(
        r"(\d{2}[A-Z]{2}\d{5})<?[\d<]?FRA(\d{6})[\d<]?[MFX<](\d{6})"
    ).unwrap();

    // Passport number printed in the visual zone
    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"\b(\d{2}[A-Z]{2}\d{5})\b"
    ).unwrap();

    // Labeled surname, up to the next label or the MRZ
    pub static ref SURNAME_LABEL: Regex = Regex::new(
        r"(?i)(?:\bNom(?:\s+Surname)?|\bSurname)\s+([A-Z\s'-]+?)\s*(?:Prénom|Given|Nationalité|Date|P<|$)"
    ).unwrap();

    // Labeled given names, up to the next label or the MRZ
    pub static ref GIVEN_NAMES_LABEL: Regex = Regex::new(
        r"(?i)(?:Prénom\(s\)(?:\s+Given\s+names)?|Prénoms(?:\s+Given\s+names)?|Given\s+names)\s+([A-Z][A-Z\s'-]+?)\s*(?:Nationalité|Date|Sexe|Sex|P<|$)"
    ).unwrap();

    // Labeled nationality (single word)
    pub static ref NATIONALITY_LABEL: Regex = Regex::new(
        r"(?i)(?:Nationalité(?:\s+Nationality)?|Nationality)\s+(\p{L}+)"
    ).unwrap();

    // Loose DD MM YYYY with optional dot/comma separators and spacing
    pub static ref DATE_LOOSE: Regex = Regex::new(
        r"\d{2}\s*[.,]?\s*\d{2}\s*[.,]?\s*\d{4}"
    ).unwrap();
}
