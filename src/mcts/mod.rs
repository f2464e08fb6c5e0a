pub mod algorithm;
pub mod capability;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod selection;
pub mod tree;

pub use algorithm::{plan, search, TurnPlanner};
pub use capability::{ExpansionHeuristic, FirstCandidate, GameState, PlayerId, TurnAction};
pub use hyperparameters::{PlannerConfig, SearchBudget};
pub use mcts_result::PlanResult;
pub use node::{NodeId, TreeNode};
pub use tree::SearchTree;

/// Integration errors that abort a planning episode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("non-terminal state reported no legal actions")]
    NoLegalActions,

    #[error("expansion heuristic chose candidate {index} out of {candidates}")]
    HeuristicOutOfRange { index: usize, candidates: usize },
}
