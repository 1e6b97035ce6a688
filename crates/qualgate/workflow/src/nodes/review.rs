use crate::error::WorkflowResult;
use crate::node::WorkflowNode;
use crate::state::{StateUpdate, WorkflowState};

/// Closes the current review iteration: fresh totals, verdict and ranked
/// patches. No-op without a review in state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReviewFinalizeNode;

impl WorkflowNode for ReviewFinalizeNode {
    fn name(&self) -> &str {
        "review_finalize"
    }

    fn run(&self, state: &WorkflowState) -> WorkflowResult<StateUpdate> {
        let Some(review) = &state.review else {
            return Ok(StateUpdate::default());
        };
        let mut review = review.clone();
        review.finalize();
        Ok(StateUpdate::review(review))
    }
}
