//! Error types for review aggregation.

use qualgate_types::TypesError;
use thiserror::Error;

/// Errors raised while building or parsing a review record.
///
/// Aggregation itself never fails; these cover malformed input only.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Iterations are numbered from 1.
    #[error("invalid iteration {0}: iterations start at 1")]
    InvalidIteration(u32),

    #[error("iteration {0} has no successor")]
    IterationOverflow(u32),

    #[error("worker name must not be empty")]
    EmptyWorkerName,

    /// `workers_run ∪ workers_skipped` does not match the findings keys.
    #[error("worker bookkeeping inconsistent: {0}")]
    WorkerSetMismatch(String),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;
