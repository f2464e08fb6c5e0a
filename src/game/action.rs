use crate::game::unit::UnitKind;
use crate::hex::Hex;
use crate::mcts::TurnAction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a player can do during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkirmishAction {
    /// Walk a unit to an empty hex within its movement.
    MoveTo { from: Hex, to: Hex },
    /// Walk next to the enemy at `to` and attack it.
    AttackTo { from: Hex, to: Hex },
    /// Walk to `to` and hit the capitol at `target` without taking its hex.
    AttackBounceTo { from: Hex, to: Hex, target: Hex },
    /// Buy a unit on an empty hex next to the player's capitol.
    RecruitAt { hex: Hex, kind: UnitKind },
    EndTurn,
}

impl SkirmishAction {
    /// Hex the acting unit starts from, if a unit moves.
    pub fn origin(&self) -> Option<Hex> {
        match self {
            SkirmishAction::MoveTo { from, .. }
            | SkirmishAction::AttackTo { from, .. }
            | SkirmishAction::AttackBounceTo { from, .. } => Some(*from),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            SkirmishAction::AttackTo { .. } | SkirmishAction::AttackBounceTo { .. }
        )
    }
}

impl TurnAction for SkirmishAction {
    fn is_end_turn(&self) -> bool {
        matches!(self, SkirmishAction::EndTurn)
    }

    fn end_turn() -> Self {
        SkirmishAction::EndTurn
    }
}

impl fmt::Display for SkirmishAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkirmishAction::MoveTo { from, to } => write!(f, "move {} -> {}", from, to),
            SkirmishAction::AttackTo { from, to } => write!(f, "attack {} -> {}", from, to),
            SkirmishAction::AttackBounceTo { from, to, target } => {
                write!(f, "attack {} -> {} (bounce off {})", from, to, target)
            }
            SkirmishAction::RecruitAt { hex, kind } => write!(f, "recruit {:?} at {}", kind, hex),
            SkirmishAction::EndTurn => write!(f, "end turn"),
        }
    }
}
