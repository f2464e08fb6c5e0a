use crate::game::action::SkirmishAction;
use crate::mcts::{ExpansionHeuristic, PlayerId};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Expansion order: attacks, recruits, moves, and ending the turn last.
pub fn action_priority(action: &SkirmishAction) -> u8 {
    if action.is_attack() {
        return 0;
    }
    match action {
        SkirmishAction::RecruitAt { .. } => 1,
        SkirmishAction::MoveTo { .. } => 2,
        _ => 3,
    }
}

/// Expands the most aggressive candidates first, breaking ties at random.
#[derive(Debug, Clone)]
pub struct PriorityHeuristic {
    rng: StdRng,
}

impl PriorityHeuristic {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ExpansionHeuristic<SkirmishAction> for PriorityHeuristic {
    fn choose(&mut self, candidates: &[SkirmishAction], _player: PlayerId) -> usize {
        let Some(best) = candidates.iter().map(action_priority).min() else {
            return 0;
        };
        let tied: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, action)| action_priority(action) == best)
            .map(|(index, _)| index)
            .collect();
        tied.choose(&mut self.rng).copied().unwrap_or(0)
    }
}
