use crate::game::action::SkirmishAction;
use crate::game::game_state::SkirmishState;
use crate::mcts::{GameState, PlayerId, TurnAction};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Actions a rollout may take in one turn before it is forced to end it.
pub const ROLLOUT_ACTIONS_PER_TURN: usize = 6;

/// Random playout from `state` to a terminal position, scored for `player`.
///
/// Every random choice comes from `rng`, so a seeded generator replays the
/// same game.
///
/// Every turn ends after at most [`ROLLOUT_ACTIONS_PER_TURN`] actions, so the
/// turn limit bounds the playout.
pub fn simulate_game(state: &SkirmishState, player: PlayerId, rng: &mut StdRng) -> f64 {
    let mut current = state.clone();
    let mut actions_this_turn = 0;

    while !current.is_terminal() {
        let action = if actions_this_turn >= ROLLOUT_ACTIONS_PER_TURN {
            SkirmishAction::end_turn()
        } else {
            current
                .legal_actions()
                .choose(&mut *rng)
                .copied()
                .unwrap_or(SkirmishAction::EndTurn)
        };

        actions_this_turn = if action.is_end_turn() {
            0
        } else {
            actions_this_turn + 1
        };
        current = current.apply(&action);
    }

    current.score(player)
}
