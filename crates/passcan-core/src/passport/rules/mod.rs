//! Rule-based field extractors for French passports.

pub mod dates;
pub mod mrz;
pub mod patterns;
pub mod text;
pub mod visual;

pub use dates::{clean_date, pick_delivery_date, DateExtractor};
pub use mrz::{birth_century, expiration_date, MrzDecoder};
pub use text::{normalize_text, normalize_token, strip_spaces};
pub use visual::VisualZoneExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
