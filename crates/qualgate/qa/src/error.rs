use qualgate_types::TypesError;
use thiserror::Error;

/// Errors raised while building or parsing a QA record.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("acceptance criterion id must not be empty")]
    EmptyAcId,

    #[error("acceptance criterion {0} recorded more than once")]
    DuplicateAc(String),

    #[error("issue {0} recorded more than once")]
    DuplicateIssue(String),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type QaResult<T> = Result<T, QaError>;
