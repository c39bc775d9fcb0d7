//! Field validation: the accept/reject gate for a scored page.

use crate::error::PageError;
use crate::models::passport::{ExtractedFields, PassportRecord};

/// Turn scored fields into a validated record.
///
/// Nationality is checked first, then the mandatory fields. The delivery date
/// is optional.
pub fn validate(fields: ExtractedFields) -> Result<PassportRecord, PageError> {
    if !fields.is_french() {
        return Err(PageError::NotFrench);
    }

    let missing = fields.missing_mandatory();
    if !missing.is_empty() {
        return Err(PageError::MissingFields(missing));
    }

    match fields {
        ExtractedFields {
            last_name: Some(last_name),
            first_name: Some(first_name),
            passport_number: Some(passport_number),
            birth_date: Some(birth_date),
            delivery_date,
            expiration_date: Some(expiration_date),
            confidence_score,
            ..
        } => Ok(PassportRecord::new(
            last_name,
            first_name,
            passport_number,
            birth_date,
            delivery_date,
            expiration_date,
            confidence_score,
        )),
        _ => Err(PageError::Internal),
    }
}
