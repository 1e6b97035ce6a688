//! The node abstraction and a sequential runner.

use tracing::{debug, info};

use crate::error::{WorkflowError, WorkflowResult};
use crate::state::{StateUpdate, WorkflowState};

/// One step of the story workflow.
///
/// Nodes read the state and return a partial update; they never mutate the
/// state they are given.
pub trait WorkflowNode {
    fn name(&self) -> &str;

    fn run(&self, state: &WorkflowState) -> WorkflowResult<StateUpdate>;
}

/// Run `nodes` in order, merging each update before the next node runs.
///
/// Stops at the first failing node; the error names that node.
pub fn run_nodes(
    mut state: WorkflowState,
    nodes: &[&dyn WorkflowNode],
) -> WorkflowResult<WorkflowState> {
    for node in nodes {
        debug!(story_id = %state.story_id, node = node.name(), "Running workflow node");
        let update = node.run(&state).map_err(|source| WorkflowError::Node {
            node: node.name().to_string(),
            source: Box::new(source),
        })?;
        state.apply(update);
    }
    info!(
        story_id = %state.story_id,
        nodes = nodes.len(),
        commitment_validated = state.commitment_validated,
        "Workflow run complete"
    );
    Ok(state)
}
