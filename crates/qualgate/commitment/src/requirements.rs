//! Gate thresholds and per-call configuration.

use qualgate_types::validate;
use serde::{Deserialize, Serialize};

use crate::approval::OverrideRequest;
use crate::error::CommitmentResult;

/// Minimum readiness score required (inclusive).
pub const DEFAULT_READINESS_THRESHOLD: u32 = 85;
/// Maximum MVP-blocking gaps allowed.
pub const DEFAULT_MAX_BLOCKERS: u32 = 0;
/// Maximum known unknowns allowed.
pub const DEFAULT_MAX_UNKNOWNS: u32 = 5;

/// Thresholds the gate validates against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GateRequirements {
    /// 0–100, score must be `>=` this.
    pub readiness_threshold: u32,
    /// Blockers must be `<=` this.
    pub max_blockers: u32,
    /// Unknowns must be `<=` this.
    pub max_unknowns: u32,
    /// Whether a failed gate may be bypassed by an override request.
    pub allow_override: bool,
}

impl Default for GateRequirements {
    fn default() -> Self {
        Self {
            readiness_threshold: DEFAULT_READINESS_THRESHOLD,
            max_blockers: DEFAULT_MAX_BLOCKERS,
            max_unknowns: DEFAULT_MAX_UNKNOWNS,
            allow_override: true,
        }
    }
}

impl GateRequirements {
    pub fn with_readiness_threshold(mut self, threshold: u32) -> Self {
        self.readiness_threshold = threshold;
        self
    }

    pub fn with_max_blockers(mut self, max: u32) -> Self {
        self.max_blockers = max;
        self
    }

    pub fn with_max_unknowns(mut self, max: u32) -> Self {
        self.max_unknowns = max;
        self
    }

    pub fn without_override(mut self) -> Self {
        self.allow_override = false;
        self
    }

    pub fn validate(&self) -> CommitmentResult<()> {
        validate::in_range(
            "readinessThreshold",
            f64::from(self.readiness_threshold),
            0.0,
            100.0,
        )?;
        Ok(())
    }
}

/// How an override request on a failed gate is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// The request is its own authorization: approved by `system` at once.
    #[default]
    AutoApprove,
    /// The request is recorded as pending and the gate stays closed until an
    /// approver decides it.
    RequireApproval,
}

/// Configuration for one gate validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitmentGateConfig {
    pub requirements: GateRequirements,
    /// Pre-approved override request for exceptional cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_request: Option<OverrideRequest>,
    pub override_policy: OverridePolicy,
}

impl CommitmentGateConfig {
    pub fn with_requirements(mut self, requirements: GateRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_override_request(mut self, request: OverrideRequest) -> Self {
        self.override_request = Some(request);
        self
    }

    pub fn with_override_policy(mut self, policy: OverridePolicy) -> Self {
        self.override_policy = policy;
        self
    }

    pub fn validate(&self) -> CommitmentResult<()> {
        self.requirements.validate()?;
        if let Some(request) = &self.override_request {
            request.validate()?;
        }
        Ok(())
    }
}
