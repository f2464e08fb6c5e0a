//! Capabilities the planner consumes from the rules engine.
//!
//! The planner never inspects game rules: it enumerates actions, applies them,
//! asks for terminal status and runs rollouts through [`GameState`], and lets
//! an [`ExpansionHeuristic`] decide which candidate to materialize next.

use std::fmt::Debug;

/// Identifier of the player a tree is searched for.
pub type PlayerId = usize;

/// An in-turn action. Exactly one kind of action ends the turn.
pub trait TurnAction: Clone + Debug {
    fn is_end_turn(&self) -> bool;

    /// The action that ends the current turn.
    fn end_turn() -> Self;
}

/// Snapshot of a game the planner can search from.
///
/// `apply` must be pure: the receiver is left untouched and the returned
/// state is exactly the result of playing `action`.
pub trait GameState: Clone {
    type Action: TurnAction;

    /// Actions available to the player to move. Non-terminal states must
    /// offer at least one.
    fn legal_actions(&self) -> Vec<Self::Action>;

    fn is_terminal(&self) -> bool;

    /// Plays the game out to a terminal outcome and scores it for `player`.
    /// Must finish in a bounded number of steps.
    fn rollout(&self, player: PlayerId) -> f64;

    fn apply(&self, action: &Self::Action) -> Self;
}

/// Strategy picking which unexpanded candidate becomes the next child.
///
/// Returns an index into `candidates`; anything out of range aborts the
/// planning episode.
pub trait ExpansionHeuristic<A> {
    fn choose(&mut self, candidates: &[A], player: PlayerId) -> usize;
}

impl<A, F> ExpansionHeuristic<A> for F
where
    F: FnMut(&[A], PlayerId) -> usize,
{
    fn choose(&mut self, candidates: &[A], player: PlayerId) -> usize {
        self(candidates, player)
    }
}

/// Expands candidates in enumeration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl<A> ExpansionHeuristic<A> for FirstCandidate {
    fn choose(&mut self, _candidates: &[A], _player: PlayerId) -> usize {
        0
    }
}
