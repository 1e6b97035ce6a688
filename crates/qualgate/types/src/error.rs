use thiserror::Error;

use crate::schema::CURRENT_SCHEMA;

/// Field-level validation failures shared by all record types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    #[error("unsupported schema version {0} (expected {expected})", expected = CURRENT_SCHEMA)]
    UnsupportedSchema(u32),

    #[error("unknown severity: {0}")]
    UnknownSeverity(String),

    #[error("field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    #[error("field `{field}` must have at least {min} characters (got {len})")]
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("field `{field}` must have at least {min} entries (got {len})")]
    TooFewEntries {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("field `{field}` out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Convenience result type for shared validation.
pub type TypesResult<T> = Result<T, TypesError>;
