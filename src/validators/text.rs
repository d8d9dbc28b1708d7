//! Length checks on trimmed text. Lengths count characters, not bytes, so
//! Arabic input is measured the same way as English.

use super::ValidationError;

pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_owned(),
        });
    }
    Ok(())
}

pub fn validate_min_chars(field: &str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_owned(),
            min,
        });
    }
    Ok(())
}

pub fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_owned(),
            max,
        });
    }
    Ok(())
}

pub fn validate_rating(rating: i64) -> Result<u8, ValidationError> {
    u8::try_from(rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or(ValidationError::RatingOutOfRange)
}
