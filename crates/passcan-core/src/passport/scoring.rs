//! Confidence scoring.
//!
//! The score is the mean OCR confidence of the page words that match a token
//! of the decoded identity fields. It says how clearly the decoded text was
//! seen, not whether the fields are correct.

use std::collections::HashSet;

use super::rules::normalize_token;
use crate::models::passport::ExtractedFields;
use crate::ocr::OcrWord;

/// Computes the aggregate extraction confidence for a page.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    round: bool,
}

impl ConfidenceScorer {
    /// Create a scorer that rounds to four decimal places.
    pub fn new() -> Self {
        Self { round: true }
    }

    /// Set rounding of the final score.
    pub fn with_rounding(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Score `fields` against the page's OCR words. Always within `[0.0, 1.0]`.
    pub fn score(&self, fields: &ExtractedFields, words: &[OcrWord]) -> f32 {
        let targets = target_tokens(fields);
        if targets.is_empty() {
            return 0.0;
        }

        let matched: Vec<f32> = words
            .iter()
            .filter(|word| {
                let token = normalize_token(&word.text);
                !token.is_empty() && targets.contains(&token)
            })
            .map(|word| clamp_confidence(word.confidence))
            .collect();

        if matched.is_empty() {
            return 0.0;
        }

        let mean = matched.iter().sum::<f32>() / matched.len() as f32;
        let mean = mean.clamp(0.0, 1.0);

        if self.round {
            (mean * 10_000.0).round() / 10_000.0
        } else {
            mean
        }
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalized tokens of the scored fields (names, passport number,
/// nationality). Multi-part values also contribute their parts concatenated,
/// to catch OCR runs that merged words.
pub fn target_tokens(fields: &ExtractedFields) -> HashSet<String> {
    let mut targets = HashSet::new();

    let values = [
        &fields.last_name,
        &fields.first_name,
        &fields.passport_number,
        &fields.nationality,
    ];

    for value in values.into_iter().flatten() {
        let parts: Vec<String> = value
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|part| !part.is_empty())
            .map(normalize_token)
            .collect();

        if parts.len() > 1 {
            targets.insert(parts.concat());
        }
        targets.extend(parts.into_iter().filter(|part| !part.is_empty()));
    }

    targets
}

fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields() -> ExtractedFields {
        ExtractedFields {
            last_name: Some("MARTIN".to_string()),
            first_name: Some("JEAN PIERRE".to_string()),
            passport_number: Some("12AB34567".to_string()),
            nationality: Some("Française".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_target_tokens() {
        let mut tokens: Vec<String> = target_tokens(&fields()).into_iter().collect();
        tokens.sort();

        assert_eq!(
            tokens,
            vec!["12AB34567", "FRANCAISE", "JEAN", "JEANPIERRE", "MARTIN", "PIERRE"]
        );
    }

    #[test]
    fn test_hyphenated_names_split() {
        let fields = ExtractedFields {
            first_name: Some("Marie-Hélène".to_string()),
            ..Default::default()
        };
        let tokens = target_tokens(&fields);

        assert!(tokens.contains("MARIE"));
        assert!(tokens.contains("HELENE"));
        assert!(tokens.contains("MARIEHELENE"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_score_is_mean_of_matches() {
        let words = vec![
            OcrWord::new("PASSEPORT", 0.99),
            OcrWord::new("Martin", 0.9),
            OcrWord::new("JEAN-PIERRE", 0.7),
            OcrWord::new("FRANÇAISE", 0.8),
            OcrWord::new("12AB34567", 1.0),
        ];

        // MARTIN, JEANPIERRE, FRANCAISE, 12AB34567 match.
        let score = ConfidenceScorer::new().score(&fields(), &words);
        assert_eq!(score, 0.85);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let words = vec![OcrWord::new("REPUBLIQUE", 0.99), OcrWord::new("PASSEPORT", 0.98)];
        assert_eq!(ConfidenceScorer::new().score(&fields(), &words), 0.0);
    }

    #[test]
    fn test_empty_fields_score_zero() {
        let words = vec![OcrWord::new("MARTIN", 0.9)];
        assert_eq!(ConfidenceScorer::new().score(&ExtractedFields::default(), &words), 0.0);
    }

    #[test]
    fn test_score_clamped_for_bad_confidences() {
        let words = vec![
            OcrWord::new("MARTIN", 7.5),
            OcrWord::new("JEAN", -1.0),
            OcrWord::new("PIERRE", f32::NAN),
        ];
        let score = ConfidenceScorer::new().score(&fields(), &words);

        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.3333);
    }

    #[test]
    fn test_rounding_can_be_disabled() {
        let words = vec![
            OcrWord::new("MARTIN", 0.91234),
            OcrWord::new("JEAN", 0.91234),
        ];
        let score = ConfidenceScorer::new()
            .with_rounding(false)
            .score(&fields(), &words);

        assert!((score - 0.91234).abs() < 1e-6);
    }

    #[test]
    fn test_punctuation_only_words_ignored() {
        let words = vec![OcrWord::new("<<<<", 0.1), OcrWord::new("MARTIN", 0.6)];
        assert_eq!(ConfidenceScorer::new().score(&fields(), &words), 0.6);
    }
}
