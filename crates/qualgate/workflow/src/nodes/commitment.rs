use qualgate_commitment::{
    validate_commitment_readiness, CommitmentGateConfig, GateRequirements, OverrideRequest,
};
use tracing::warn;

use crate::error::{WorkflowError, WorkflowResult};
use crate::node::WorkflowNode;
use crate::state::{StateUpdate, WorkflowState};

/// What to do when the state carries no readiness result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingReadiness {
    /// Record the gate as not validated and carry on.
    FailClosed,
    /// Return [`WorkflowError::MissingReadinessResult`].
    Error,
}

/// Runs the commitment gate against `state.readiness_result`.
#[derive(Clone, Debug)]
pub struct CommitmentGateNode {
    config: CommitmentGateConfig,
    on_missing: MissingReadiness,
}

impl CommitmentGateNode {
    /// Default requirements; a missing readiness result is not an error.
    pub fn lenient() -> Self {
        Self {
            config: CommitmentGateConfig::default(),
            on_missing: MissingReadiness::FailClosed,
        }
    }

    /// Custom configuration; a missing readiness result is an error.
    pub fn strict(config: CommitmentGateConfig) -> Self {
        Self {
            config,
            on_missing: MissingReadiness::Error,
        }
    }

    /// Strict node with a pre-bound override request.
    pub fn with_override(request: OverrideRequest, requirements: Option<GateRequirements>) -> Self {
        let config = CommitmentGateConfig::default()
            .with_requirements(requirements.unwrap_or_default())
            .with_override_request(request);
        Self::strict(config)
    }

    pub fn config(&self) -> &CommitmentGateConfig {
        &self.config
    }
}

impl WorkflowNode for CommitmentGateNode {
    fn name(&self) -> &str {
        "commitment_gate"
    }

    fn run(&self, state: &WorkflowState) -> WorkflowResult<StateUpdate> {
        let Some(readiness) = &state.readiness_result else {
            return match self.on_missing {
                MissingReadiness::FailClosed => {
                    warn!(
                        story_id = %state.story_id,
                        "No readiness result; commitment gate not validated"
                    );
                    Ok(StateUpdate::commitment(None, false))
                }
                MissingReadiness::Error => Err(WorkflowError::MissingReadinessResult),
            };
        };

        // The flag records that the gate ran; the outcome is `result.passed`.
        let result = validate_commitment_readiness(readiness, &self.config)?;
        Ok(StateUpdate::commitment(Some(result), true))
    }
}
