use std::time::Duration;

/// Outcome of one planning episode.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult<A> {
    /// Actions to play in order; the last one always ends the turn.
    pub actions: Vec<A>,
    /// Completed select/expand/simulate/backpropagate iterations.
    pub iterations: usize,
    /// Equal to `iterations`: every rollout passes through the root.
    pub root_visits: u32,
    /// Nodes materialized, root included.
    pub tree_size: usize,
    pub elapsed: Duration,
}
