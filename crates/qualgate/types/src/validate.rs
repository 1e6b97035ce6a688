//! Field constraint helpers used by validated constructors and `from_json`.

use crate::error::{TypesError, TypesResult};

/// Reject empty or whitespace-only strings.
pub fn non_empty(field: &'static str, value: &str) -> TypesResult<()> {
    if value.trim().is_empty() {
        return Err(TypesError::EmptyField { field });
    }
    Ok(())
}

/// Require at least `min` characters.
pub fn min_chars(field: &'static str, value: &str, min: usize) -> TypesResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(TypesError::TooShort { field, len, min });
    }
    Ok(())
}

/// Require at least `min` entries.
pub fn min_entries<T>(field: &'static str, values: &[T], min: usize) -> TypesResult<()> {
    if values.len() < min {
        return Err(TypesError::TooFewEntries {
            field,
            len: values.len(),
            min,
        });
    }
    Ok(())
}

/// Require `min <= value <= max`.
pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> TypesResult<()> {
    if value.is_nan() || value < min || value > max {
        return Err(TypesError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
