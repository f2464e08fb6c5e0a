//! Search tree nodes.
//!
//! Nodes live in the [`SearchTree`](crate::mcts::tree::SearchTree) arena and
//! refer to each other through [`NodeId`] handles. The parent handle is
//! read-only bookkeeping: ownership runs strictly from the arena root down.

use crate::mcts::capability::{GameState, PlayerId};
use crate::mcts::PlannerError;

/// Stable index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One decision point of a turn.
#[derive(Debug, Clone)]
pub struct TreeNode<S: GameState> {
    /// State reached by `action` from the parent's state.
    pub state: S,
    /// Action that created this node; `None` for the root.
    pub action: Option<S::Action>,
    pub parent: Option<NodeId>,
    /// Sum of rollout rewards backpropagated through this node.
    pub reward: f64,
    /// Completed rollouts through this node.
    pub visits: u32,
    /// Legal actions not yet turned into children.
    pub unexpanded: Vec<S::Action>,
    /// Children in expansion order.
    pub children: Vec<NodeId>,
    terminal: bool,
}

impl<S: GameState> TreeNode<S> {
    /// Creates a node and records every legal action as a candidate.
    ///
    /// Terminal states never expand, so they record no candidates. A
    /// non-terminal state without legal actions is rejected.
    pub fn new(
        state: S,
        action: Option<S::Action>,
        parent: Option<NodeId>,
    ) -> Result<Self, PlannerError> {
        let terminal = state.is_terminal();
        let unexpanded = if terminal {
            Vec::new()
        } else {
            let actions = state.legal_actions();
            if actions.is_empty() {
                return Err(PlannerError::NoLegalActions);
            }
            actions
        };

        Ok(Self {
            state,
            action,
            parent,
            reward: 0.0,
            visits: 0,
            unexpanded,
            children: Vec::new(),
            terminal,
        })
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn average_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// Plays this node's state out for `player`.
    pub fn rollout(&self, player: PlayerId) -> f64 {
        self.state.rollout(player)
    }
}
