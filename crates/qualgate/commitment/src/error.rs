use qualgate_types::TypesError;
use thiserror::Error;

/// Errors from commitment gate validation and override handling.
#[derive(Error, Debug)]
pub enum CommitmentError {
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("invalid approval transition for audit {audit_id}: {from} -> {to}")]
    InvalidApprovalTransition {
        audit_id: String,
        from: String,
        to: String,
    },

    #[error("no override recorded for story: {0}")]
    NoOverrideRecorded(String),

    #[error("inconsistent gate result: {0}")]
    InconsistentResult(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors specific to the override audit ledger.
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("override audit not found in ledger: {0}")]
    NotFound(String),

    #[error("duplicate override audit id: {0}")]
    DuplicateEntry(String),

    #[error("audit digest does not match contents: {0}")]
    DigestMismatch(String),

    #[error("override {0} has already been decided")]
    AlreadyDecided(String),

    #[error("override {0} is still pending; only decisions can be appended")]
    UndecidedEntry(String),

    #[error("ledger immutability violation: request or bypassed checks changed for {0}")]
    ImmutabilityViolation(String),
}

/// Convenience result type for commitment gate operations.
pub type CommitmentResult<T> = Result<T, CommitmentError>;
