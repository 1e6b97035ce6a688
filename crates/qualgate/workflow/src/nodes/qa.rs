use tracing::info;

use crate::error::WorkflowResult;
use crate::node::WorkflowNode;
use crate::state::{StateUpdate, WorkflowState};

/// Recalculates and stores the QA verdict. No-op without a QA record.
///
/// With a coverage threshold, recorded coverage is judged against it before
/// the verdict is applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct QaVerdictNode {
    coverage_threshold: Option<f64>,
}

impl QaVerdictNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coverage_threshold(threshold: f64) -> Self {
        Self {
            coverage_threshold: Some(threshold),
        }
    }
}

impl WorkflowNode for QaVerdictNode {
    fn name(&self) -> &str {
        "qa_verdict"
    }

    fn run(&self, state: &WorkflowState) -> WorkflowResult<StateUpdate> {
        let Some(qa) = &state.qa_verify else {
            return Ok(StateUpdate::default());
        };
        let mut qa = qa.clone();
        if let (Some(coverage), Some(threshold)) = (qa.coverage, self.coverage_threshold) {
            qa.record_coverage(coverage, threshold)?;
        }
        qa.apply_verdict();
        info!(
            story_id = %qa.story_id,
            passed = qa.qa_passed_successfully(),
            summary = %qa.generate_qa_summary(),
            "QA verdict recorded"
        );
        Ok(StateUpdate::qa(qa))
    }
}
