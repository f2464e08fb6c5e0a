//! Child selection policies.
//!
//! - During search: UCB1 over fully visited children
//! - After search: the most visited child
//!
//! Both resolve ties in favor of the child expanded first, so a search with
//! deterministic rollouts extracts the same plan every time.

use crate::mcts::capability::GameState;
use crate::mcts::node::NodeId;
use crate::mcts::tree::SearchTree;

/// UCB1 score: `reward/visits + sqrt(ln(parent_visits) / visits)`.
pub fn ucb1(reward: f64, visits: u32, parent_visits: u32) -> f64 {
    let visits = visits as f64;
    reward / visits + ((parent_visits as f64).ln() / visits).sqrt()
}

/// UCB1 score of a non-root node with at least one visit.
pub fn selection_score<S: GameState>(tree: &SearchTree<S>, id: NodeId) -> f64 {
    let node = tree.get(id);
    debug_assert!(node.visits > 0, "scored a node that was never rolled out");
    let parent_visits = node.parent.map_or(0, |parent| tree.get(parent).visits);
    debug_assert!(parent_visits > 0, "scored the root or a child of an unvisited node");
    ucb1(node.reward, node.visits, parent_visits)
}

/// Child with the strictly greatest UCB1 score; the first one wins ties.
pub fn best_by_score<S: GameState>(tree: &SearchTree<S>, id: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &child in &tree.get(id).children {
        let score = selection_score(tree, child);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child, score)),
        }
    }
    best.map(|(child, _)| child)
}

/// Child with the greatest visit count; the first one wins ties.
pub fn most_visited_child<S: GameState>(tree: &SearchTree<S>, id: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, u32)> = None;
    for &child in &tree.get(id).children {
        let visits = tree.get(child).visits;
        match best {
            Some((_, best_visits)) if visits <= best_visits => {}
            _ => best = Some((child, visits)),
        }
    }
    best.map(|(child, _)| child)
}

/// Descends from `id` through fully expanded, non-terminal nodes by UCB1.
///
/// Stops at the first terminal or not fully expanded node.
pub fn descend<S: GameState>(tree: &SearchTree<S>, id: NodeId) -> NodeId {
    let mut current = id;
    loop {
        let node = tree.get(current);
        if node.is_terminal() || !node.is_fully_expanded() {
            return current;
        }
        match best_by_score(tree, current) {
            Some(child) => current = child,
            None => return current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::capability::{FirstCandidate, PlayerId, TurnAction};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Arm {
        Pull(u8),
        Stop,
    }

    impl TurnAction for Arm {
        fn is_end_turn(&self) -> bool {
            matches!(self, Arm::Stop)
        }

        fn end_turn() -> Self {
            Arm::Stop
        }
    }

    #[derive(Debug, Clone)]
    struct Bandit {
        arms: u8,
        done: bool,
    }

    impl GameState for Bandit {
        type Action = Arm;

        fn legal_actions(&self) -> Vec<Arm> {
            (0..self.arms).map(Arm::Pull).chain([Arm::Stop]).collect()
        }

        fn is_terminal(&self) -> bool {
            self.done
        }

        fn rollout(&self, _player: PlayerId) -> f64 {
            0.0
        }

        fn apply(&self, _action: &Arm) -> Self {
            Bandit {
                arms: self.arms,
                done: true,
            }
        }
    }

    /// Root with `children` expanded, visit counts and rewards set by hand.
    fn tree_with(stats: &[(u32, f64)]) -> (SearchTree<Bandit>, Vec<NodeId>) {
        let arms = stats.len() as u8 - 1;
        let mut tree = SearchTree::new(Bandit { arms, done: false }, 0).unwrap();
        let root = tree.root();
        let mut children = Vec::new();
        for &(visits, reward) in stats {
            let child = tree.expand_one(root, &mut FirstCandidate).unwrap();
            let node = tree.get_mut(child);
            node.visits = visits;
            node.reward = reward;
            children.push(child);
        }
        tree.get_mut(root).visits = stats.iter().map(|(v, _)| v).sum();
        (tree, children)
    }

    #[test]
    fn test_ucb1_formula() {
        let score = ucb1(3.0, 4, 10);
        let expected = 0.75 + (10f64.ln() / 4.0).sqrt();
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_selection_score_uses_parent_visits() {
        let (tree, children) = tree_with(&[(2, 1.0), (3, 3.0)]);
        let expected = 1.0 + (5f64.ln() / 3.0).sqrt();
        assert!((selection_score(&tree, children[1]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_best_by_score_prefers_higher_average() {
        let (tree, children) = tree_with(&[(5, 1.0), (5, 4.0), (5, 2.0)]);
        assert_eq!(best_by_score(&tree, tree.root()), Some(children[1]));
    }

    #[test]
    fn test_best_by_score_rewards_fewer_visits() {
        // same average, the less explored child gets the larger bonus
        let (tree, children) = tree_with(&[(8, 4.0), (2, 1.0)]);
        assert_eq!(best_by_score(&tree, tree.root()), Some(children[1]));
    }

    #[test]
    fn test_ties_go_to_first_child() {
        let (tree, children) = tree_with(&[(3, 1.0), (3, 1.0), (3, 1.0)]);
        assert_eq!(best_by_score(&tree, tree.root()), Some(children[0]));
        assert_eq!(most_visited_child(&tree, tree.root()), Some(children[0]));
    }

    #[test]
    fn test_most_visited_child_is_maximal() {
        let (tree, children) = tree_with(&[(2, 2.0), (9, 0.0), (4, 4.0), (9, 9.0)]);
        let best = most_visited_child(&tree, tree.root()).unwrap();
        assert_eq!(best, children[1]);
        let best_visits = tree.get(best).visits;
        assert!(children.iter().all(|&c| tree.get(c).visits <= best_visits));
    }

    #[test]
    fn test_no_children() {
        let tree = SearchTree::new(Bandit { arms: 2, done: false }, 0).unwrap();
        assert_eq!(best_by_score(&tree, tree.root()), None);
        assert_eq!(most_visited_child(&tree, tree.root()), None);
    }

    #[test]
    fn test_descend_stops_at_unexpanded_root() {
        let mut tree = SearchTree::new(Bandit { arms: 2, done: false }, 0).unwrap();
        let root = tree.root();
        assert_eq!(descend(&tree, root), root);

        tree.expand_one(root, &mut FirstCandidate).unwrap();
        assert_eq!(descend(&tree, root), root);
    }

    #[test]
    fn test_descend_reaches_terminal_leaf() {
        let (tree, children) = tree_with(&[(1, 0.0), (6, 6.0)]);
        assert_eq!(descend(&tree, tree.root()), children[1]);
    }
}
