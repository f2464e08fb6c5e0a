//! Arena-backed search tree for one planning episode.
//!
//! Nodes are stored in a contiguous `Vec` and addressed by [`NodeId`]. The
//! tree is built for a single player: every node shares the same owning
//! player id, because a turn is a sequence of that player's own actions.

use crate::mcts::capability::{ExpansionHeuristic, GameState, PlayerId};
use crate::mcts::node::{NodeId, TreeNode};
use crate::mcts::PlannerError;

#[derive(Debug)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<TreeNode<S>>,
    player: PlayerId,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree holding only the root built from `root_state`.
    pub fn new(root_state: S, player: PlayerId) -> Result<Self, PlannerError> {
        let root = TreeNode::new(root_state, None, None)?;
        Ok(Self {
            nodes: vec![root],
            player,
        })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true once constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materializes one unexpanded candidate of `id` as a new child.
    ///
    /// The heuristic sees the remaining candidates and the tree's player and
    /// must answer with an index into them.
    pub fn expand_one<H>(&mut self, id: NodeId, heuristic: &mut H) -> Result<NodeId, PlannerError>
    where
        H: ExpansionHeuristic<S::Action> + ?Sized,
    {
        let player = self.player;
        let node = self.get_mut(id);
        let candidates = node.unexpanded.len();
        let index = heuristic.choose(&node.unexpanded, player);
        if index >= candidates {
            return Err(PlannerError::HeuristicOutOfRange { index, candidates });
        }

        let action = node.unexpanded.remove(index);
        let state = node.state.apply(&action);
        let child = TreeNode::new(state, Some(action), Some(id))?;

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.get_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// Rolls the node's state out for the tree's player.
    pub fn rollout(&self, id: NodeId) -> f64 {
        self.get(id).rollout(self.player)
    }

    /// Adds `value` to `id` and every ancestor, counting one visit each.
    pub fn backpropagate(&mut self, id: NodeId, value: f64) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.reward += value;
            node.visits += 1;
            current = node.parent;
        }
    }

    /// Depth of `id` below the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }
}
