//! Override requests, their approval state and the sealed audit record.
//!
//! An override moves through a small state machine:
//!
//! ```text
//!   Pending ──approve──▶ Approved { by, at }
//!      │
//!      └────reject────▶ Rejected { by, at, reason }
//! ```
//!
//! Approved and Rejected are terminal. Every [`OverrideAuditEntry`] carries
//! a BLAKE3 digest over its canonical JSON form so a record that was edited
//! after sealing is detectable.

use qualgate_types::{validate, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::check::GateCheckResult;
use crate::error::{CommitmentError, CommitmentResult};

/// Approver recorded when an override is approved by policy.
pub const SYSTEM_APPROVER: &str = "system";

/// Minimum characters in an override justification.
pub const MIN_REASON_CHARS: usize = 10;

/// A request to bypass a failed gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    pub requested_by: String,
    pub reason: String,
    pub requested_at: Timestamp,
    pub risks_acknowledged: Vec<String>,
}

impl OverrideRequest {
    /// Validated request stamped with the current time.
    pub fn new(
        requested_by: impl Into<String>,
        reason: impl Into<String>,
        risks_acknowledged: Vec<String>,
    ) -> CommitmentResult<Self> {
        let request = Self {
            requested_by: requested_by.into(),
            reason: reason.into(),
            requested_at: qualgate_types::now(),
            risks_acknowledged,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> CommitmentResult<()> {
        validate::non_empty("requestedBy", &self.requested_by)?;
        validate::min_chars("reason", &self.reason, MIN_REASON_CHARS)?;
        validate::min_entries("risksAcknowledged", &self.risks_acknowledged, 1)?;
        Ok(())
    }
}

/// Approval state of a recorded override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverrideApproval {
    Pending,
    Approved {
        by: String,
        at: Timestamp,
    },
    Rejected {
        by: String,
        at: Timestamp,
        reason: String,
    },
}

impl OverrideApproval {
    pub fn label(&self) -> &'static str {
        match self {
            OverrideApproval::Pending => "pending",
            OverrideApproval::Approved { .. } => "approved",
            OverrideApproval::Rejected { .. } => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OverrideApproval::Pending)
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, OverrideApproval::Approved { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, OverrideApproval::Rejected { .. })
    }
}

impl fmt::Display for OverrideApproval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decision taken on a pending override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideDecision {
    Approve { by: String },
    Reject { by: String, reason: String },
}

impl OverrideDecision {
    pub fn approve(by: impl Into<String>) -> Self {
        OverrideDecision::Approve { by: by.into() }
    }

    pub fn reject(by: impl Into<String>, reason: impl Into<String>) -> Self {
        OverrideDecision::Reject {
            by: by.into(),
            reason: reason.into(),
        }
    }

    fn target_label(&self) -> &'static str {
        match self {
            OverrideDecision::Approve { .. } => "approved",
            OverrideDecision::Reject { .. } => "rejected",
        }
    }

    fn into_approval(self) -> CommitmentResult<OverrideApproval> {
        let at = qualgate_types::now();
        match self {
            OverrideDecision::Approve { by } => {
                validate::non_empty("approvedBy", &by)?;
                Ok(OverrideApproval::Approved { by, at })
            }
            OverrideDecision::Reject { by, reason } => {
                validate::non_empty("rejectedBy", &by)?;
                validate::non_empty("rejectionReason", &reason)?;
                Ok(OverrideApproval::Rejected { by, at, reason })
            }
        }
    }
}

/// Immutable audit record of an override on a failed gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideAuditEntry {
    pub audit_id: String,
    pub story_id: String,
    pub request: OverrideRequest,
    /// Checks that failed and were bypassed.
    pub bypassed_checks: Vec<GateCheckResult>,
    pub score_at_override: u32,
    pub approval: OverrideApproval,
    pub recorded_at: Timestamp,
    /// Hex BLAKE3 digest over every other field.
    #[serde(default)]
    pub digest: String,
}

impl OverrideAuditEntry {
    pub fn approved(&self) -> bool {
        self.approval.is_approved()
    }

    pub fn approved_by(&self) -> Option<&str> {
        match &self.approval {
            OverrideApproval::Approved { by, .. } => Some(by),
            _ => None,
        }
    }

    pub fn approved_at(&self) -> Option<Timestamp> {
        match &self.approval {
            OverrideApproval::Approved { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.approval.is_pending()
    }

    /// Digest over the canonical JSON of this entry with `digest` blanked.
    pub fn compute_digest(&self) -> CommitmentResult<String> {
        let mut unsealed = self.clone();
        unsealed.digest = String::new();
        let bytes = serde_json::to_vec(&unsealed)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    pub fn verify_digest(&self) -> bool {
        self.compute_digest()
            .map(|digest| digest == self.digest)
            .unwrap_or(false)
    }

    fn seal(mut self) -> CommitmentResult<Self> {
        self.digest = self.compute_digest()?;
        Ok(self)
    }

    /// Apply a decision to a pending override, producing a new sealed entry.
    ///
    /// Only `Pending` entries may be decided.
    pub fn decide(&self, decision: OverrideDecision) -> CommitmentResult<Self> {
        if !self.is_pending() {
            return Err(CommitmentError::InvalidApprovalTransition {
                audit_id: self.audit_id.clone(),
                from: self.approval.label().to_string(),
                to: decision.target_label().to_string(),
            });
        }
        let approval = decision.into_approval()?;
        info!(
            audit_id = %self.audit_id,
            story_id = %self.story_id,
            status = approval.label(),
            "Override decided"
        );
        OverrideAuditEntry {
            approval,
            ..self.clone()
        }
        .seal()
    }
}

/// Build a sealed audit record for an override on a failed gate.
///
/// `bypassed_checks` is the failing subset of `checks`. The approver fields
/// are only present when `approval` is `Approved`.
pub fn create_override_audit(
    story_id: &str,
    request: &OverrideRequest,
    checks: &[GateCheckResult],
    score: u32,
    approval: OverrideApproval,
) -> CommitmentResult<OverrideAuditEntry> {
    validate::non_empty("storyId", story_id)?;
    request.validate()?;
    validate::in_range("scoreAtOverride", f64::from(score), 0.0, 100.0)?;
    match &approval {
        OverrideApproval::Approved { by, .. } => validate::non_empty("approvedBy", by)?,
        OverrideApproval::Rejected { by, .. } => validate::non_empty("rejectedBy", by)?,
        OverrideApproval::Pending => {}
    }

    OverrideAuditEntry {
        audit_id: Uuid::new_v4().to_string(),
        story_id: story_id.to_string(),
        request: request.clone(),
        bypassed_checks: checks.iter().filter(|c| !c.passed).cloned().collect(),
        score_at_override: score,
        approval,
        recorded_at: qualgate_types::now(),
        digest: String::new(),
    }
    .seal()
}
