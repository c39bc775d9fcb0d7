//! Text and token normalization.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Collapse raw OCR text into a single-spaced line.
///
/// Newlines and slashes become spaces, whitespace runs collapse to one space,
/// and the result is trimmed.
pub fn normalize_text(raw: &str) -> String {
    raw.replace(['\n', '/'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip every space, for matching the MRZ.
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ').collect()
}

/// Normalize a string for token-equality matching: uppercase, strip
/// diacritics, keep ASCII letters and digits only.
pub fn normalize_token(text: &str) -> String {
    text.to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("  Nom/Surname\nMARTIN \t\n\n Prénoms/Given names\r\nJEAN  "),
            "Nom Surname MARTIN Prénoms Given names JEAN"
        );
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n/ "), "");
    }

    #[test]
    fn test_strip_spaces() {
        assert_eq!(strip_spaces("P<FRA MARTIN<< JEAN"), "P<FRAMARTIN<<JEAN");
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("Française"), "FRANCAISE");
        assert_eq!(normalize_token("d'Hélène"), "DHELENE");
        assert_eq!(normalize_token("12ab-34567"), "12AB34567");
        assert_eq!(normalize_token("<<<"), "");
    }

    #[test]
    fn test_normalize_token_is_idempotent() {
        let once = normalize_token("Lefèvre-Noël");
        assert_eq!(normalize_token(&once), once);
    }
}
