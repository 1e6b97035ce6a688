//! Shared workflow state and partial updates.

use qualgate_commitment::{CommitmentGateResult, ReadinessResult};
use qualgate_qa::QaVerify;
use qualgate_review::Review;
use serde::{Deserialize, Serialize};

/// State passed between workflow nodes for one story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub story_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_result: Option<ReadinessResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment_gate_result: Option<CommitmentGateResult>,
    /// Set once the commitment gate has run, whatever its outcome.
    #[serde(default)]
    pub commitment_validated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa_verify: Option<QaVerify>,
}

impl WorkflowState {
    pub fn new(story_id: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            readiness_result: None,
            commitment_gate_result: None,
            commitment_validated: false,
            review: None,
            qa_verify: None,
        }
    }

    pub fn with_readiness(mut self, readiness: ReadinessResult) -> Self {
        self.readiness_result = Some(readiness);
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.review = Some(review);
        self
    }

    pub fn with_qa(mut self, qa: QaVerify) -> Self {
        self.qa_verify = Some(qa);
        self
    }

    /// Merge a node's partial update. Fields the update leaves unset are
    /// kept as they are.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(result) = update.commitment_gate_result {
            self.commitment_gate_result = result;
        }
        if let Some(validated) = update.commitment_validated {
            self.commitment_validated = validated;
        }
        if let Some(review) = update.review {
            self.review = Some(review);
        }
        if let Some(qa) = update.qa_verify {
            self.qa_verify = Some(qa);
        }
    }
}

/// Partial update returned by a node.
///
/// `commitment_gate_result: Some(None)` clears the stored gate result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateUpdate {
    pub commitment_gate_result: Option<Option<CommitmentGateResult>>,
    pub commitment_validated: Option<bool>,
    pub review: Option<Review>,
    pub qa_verify: Option<QaVerify>,
}

impl StateUpdate {
    pub fn commitment(result: Option<CommitmentGateResult>, validated: bool) -> Self {
        Self {
            commitment_gate_result: Some(result),
            commitment_validated: Some(validated),
            ..Default::default()
        }
    }

    pub fn review(review: Review) -> Self {
        Self {
            review: Some(review),
            ..Default::default()
        }
    }

    pub fn qa(qa: QaVerify) -> Self {
        Self {
            qa_verify: Some(qa),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
