//! # qualgate-commitment
//!
//! The commitment gate decides whether a story is ready to be committed to
//! implementation. It checks the upstream readiness score, the number of
//! MVP-blocking gaps and the number of known unknowns against configured
//! thresholds.
//!
//! A failed gate can be bypassed by an override request. Every override is
//! captured in a sealed [`OverrideAuditEntry`] and may be kept in the
//! append-only [`OverrideLedger`]. With [`OverridePolicy::RequireApproval`]
//! the override waits for an approver, see [`finalize_override`].

#![deny(unsafe_code)]

pub mod approval;
pub mod check;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod readiness;
pub mod requirements;

pub use approval::{
    create_override_audit, OverrideApproval, OverrideAuditEntry, OverrideDecision,
    OverrideRequest, MIN_REASON_CHARS, SYSTEM_APPROVER,
};
pub use check::{
    check_blocker_count, check_readiness_threshold, check_unknown_count, run_checks, Comparison,
    GateCheckResult, Requirement,
};
pub use error::{CommitmentError, CommitmentResult, LedgerError};
pub use gate::{
    finalize_override, generate_gate_summary, validate_commitment_readiness, CommitmentGateResult,
};
pub use ledger::{ApprovalStatus, LedgerFilter, LedgerRecord, OverrideLedger};
pub use readiness::{Confidence, ReadinessFactors, ReadinessResult};
pub use requirements::{
    CommitmentGateConfig, GateRequirements, OverridePolicy, DEFAULT_MAX_BLOCKERS,
    DEFAULT_MAX_UNKNOWNS, DEFAULT_READINESS_THRESHOLD,
};
