//! Commitment gate validation.

use qualgate_types::{SchemaVersion, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::approval::{
    create_override_audit, OverrideApproval, OverrideAuditEntry, OverrideDecision,
    OverrideRequest, SYSTEM_APPROVER,
};
use crate::check::{run_checks, GateCheckResult};
use crate::error::{CommitmentError, CommitmentResult};
use crate::readiness::ReadinessResult;
use crate::requirements::{CommitmentGateConfig, GateRequirements, OverridePolicy};

/// Outcome of validating a story against the commitment gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentGateResult {
    pub schema: SchemaVersion,
    pub story_id: String,
    pub validated_at: Timestamp,
    pub passed: bool,
    pub checks: Vec<GateCheckResult>,
    pub passed_checks: u32,
    pub total_checks: u32,
    pub override_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_request: Option<OverrideRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_audit: Option<OverrideAuditEntry>,
    pub summary: String,
    pub requirements: GateRequirements,
}

impl CommitmentGateResult {
    /// True when every check passed on its own.
    pub fn all_checks_passed(&self) -> bool {
        self.passed_checks == self.total_checks
    }

    /// True when the gate is open only because an override was approved.
    pub fn override_used(&self) -> bool {
        self.override_audit
            .as_ref()
            .is_some_and(OverrideAuditEntry::approved)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &GateCheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn validate(&self) -> CommitmentResult<()> {
        qualgate_types::validate::non_empty("storyId", &self.story_id)?;
        self.requirements.validate()?;
        if self.total_checks as usize != self.checks.len() {
            return Err(CommitmentError::InconsistentResult(format!(
                "totalChecks {} but {} checks recorded",
                self.total_checks,
                self.checks.len()
            )));
        }
        let passing = self.checks.iter().filter(|c| c.passed).count();
        if self.passed_checks as usize != passing {
            return Err(CommitmentError::InconsistentResult(format!(
                "passedChecks {} but {} checks passed",
                self.passed_checks, passing
            )));
        }
        if let Some(check) = self.checks.iter().find(|c| !c.is_consistent()) {
            return Err(CommitmentError::InconsistentResult(format!(
                "check {} does not match its comparison",
                check.requirement
            )));
        }
        if let Some(audit) = &self.override_audit {
            if !audit.verify_digest() {
                return Err(CommitmentError::InconsistentResult(format!(
                    "override audit {} digest mismatch",
                    audit.audit_id
                )));
            }
        }
        if self.passed != (self.all_checks_passed() || self.override_used()) {
            return Err(CommitmentError::InconsistentResult(
                "passed flag disagrees with checks and override".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> CommitmentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CommitmentResult<Self> {
        let result: CommitmentGateResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }
}

// ── Validation ──────────────────────────────────────────────────────

/// Validate a story's readiness against the configured requirements.
///
/// Failing checks never produce an error; only malformed inputs do.
pub fn validate_commitment_readiness(
    readiness: &ReadinessResult,
    config: &CommitmentGateConfig,
) -> CommitmentResult<CommitmentGateResult> {
    readiness.validate()?;
    config.validate()?;

    let requirements = &config.requirements;
    let checks = run_checks(readiness, requirements);
    let passed_checks = checks.iter().filter(|c| c.passed).count() as u32;
    let total_checks = checks.len() as u32;
    let all_passed = passed_checks == total_checks;

    debug!(
        story_id = %readiness.story_id,
        score = readiness.score,
        passed_checks,
        total_checks,
        "Commitment checks evaluated"
    );

    let mut override_audit = None;
    if !all_passed && requirements.allow_override {
        if let Some(request) = &config.override_request {
            let approval = match config.override_policy {
                OverridePolicy::AutoApprove => OverrideApproval::Approved {
                    by: SYSTEM_APPROVER.to_string(),
                    at: qualgate_types::now(),
                },
                OverridePolicy::RequireApproval => OverrideApproval::Pending,
            };
            let audit = create_override_audit(
                &readiness.story_id,
                request,
                &checks,
                readiness.score,
                approval,
            )?;
            warn!(
                story_id = %readiness.story_id,
                audit_id = %audit.audit_id,
                requested_by = %request.requested_by,
                status = audit.approval.label(),
                bypassed = audit.bypassed_checks.len(),
                "Commitment gate override recorded"
            );
            override_audit = Some(audit);
        }
    }

    let result = assemble(
        &readiness.story_id,
        checks,
        requirements.clone(),
        config.override_request.clone(),
        override_audit,
    );

    info!(
        story_id = %result.story_id,
        passed = result.passed,
        override_used = result.override_used(),
        "Commitment gate validated"
    );
    Ok(result)
}

/// Apply an approver's decision to a result whose override is pending.
///
/// Returns a new result; the input is left untouched.
pub fn finalize_override(
    result: &CommitmentGateResult,
    decision: OverrideDecision,
) -> CommitmentResult<CommitmentGateResult> {
    let audit = result
        .override_audit
        .as_ref()
        .ok_or_else(|| CommitmentError::NoOverrideRecorded(result.story_id.clone()))?;
    let decided = audit.decide(decision)?;

    let finalized = assemble(
        &result.story_id,
        result.checks.clone(),
        result.requirements.clone(),
        result.override_request.clone(),
        Some(decided),
    );
    info!(
        story_id = %finalized.story_id,
        passed = finalized.passed,
        "Commitment gate override finalized"
    );
    Ok(finalized)
}

fn assemble(
    story_id: &str,
    checks: Vec<GateCheckResult>,
    requirements: GateRequirements,
    override_request: Option<OverrideRequest>,
    override_audit: Option<OverrideAuditEntry>,
) -> CommitmentGateResult {
    let passed_checks = checks.iter().filter(|c| c.passed).count() as u32;
    let total_checks = checks.len() as u32;
    let all_passed = passed_checks == total_checks;
    let override_used = override_audit
        .as_ref()
        .is_some_and(OverrideAuditEntry::approved);
    let pending = override_audit
        .as_ref()
        .is_some_and(OverrideAuditEntry::is_pending);
    let passed = all_passed || override_used;

    // A rejected override leaves the door open for a fresh request.
    let override_available =
        !all_passed && requirements.allow_override && !override_used && !pending;

    let mut summary = generate_gate_summary(passed, &checks, override_used);
    if pending {
        summary.push_str(" Override request is pending approval.");
    }

    CommitmentGateResult {
        schema: SchemaVersion::V1,
        story_id: story_id.to_string(),
        validated_at: qualgate_types::now(),
        passed,
        checks,
        passed_checks,
        total_checks,
        override_available,
        override_request,
        override_audit,
        summary,
        requirements,
    }
}

// ── Summary ─────────────────────────────────────────────────────────

/// Human-readable gate summary.
pub fn generate_gate_summary(
    passed: bool,
    checks: &[GateCheckResult],
    override_used: bool,
) -> String {
    let total = checks.len();
    let mut parts: Vec<String> = Vec::new();

    if passed {
        if override_used {
            parts.push("COMMITMENT GATE: PASSED (with override)".to_string());
            parts.push("Gate requirements were bypassed via approved override.".to_string());
        } else {
            parts.push("COMMITMENT GATE: PASSED".to_string());
            parts.push(format!("All {total} requirements met."));
        }
        parts.push("Story is cleared for implementation.".to_string());
    } else {
        let passed_count = checks.iter().filter(|c| c.passed).count();
        parts.push("COMMITMENT GATE: FAILED".to_string());
        parts.push(format!("{passed_count}/{total} requirements met."));
        for check in checks.iter().filter(|c| !c.passed) {
            parts.push(format!("- {}", check.description));
        }
        parts.push("Story requires additional work before implementation.".to_string());
    }

    parts.join(" ")
}
