use crate::mcts::PlayerId;
use serde::{Deserialize, Serialize};

/// Lives a capitol starts with.
pub const CAPITOL_LIVES: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    Capitol,
    Soldier,
    Knight,
}

impl UnitKind {
    pub const RECRUITABLE: [UnitKind; 2] = [UnitKind::Soldier, UnitKind::Knight];

    pub fn strength(self) -> u32 {
        match self {
            UnitKind::Capitol => 0,
            UnitKind::Soldier => 1,
            UnitKind::Knight => 2,
        }
    }

    /// Hexes a unit may walk in one turn.
    pub fn movement(self) -> u32 {
        match self {
            UnitKind::Capitol => 0,
            UnitKind::Soldier => 2,
            UnitKind::Knight => 3,
        }
    }

    /// Recruitment price, `None` for units that cannot be recruited.
    pub fn cost(self) -> Option<u32> {
        match self {
            UnitKind::Capitol => None,
            UnitKind::Soldier => Some(3),
            UnitKind::Knight => Some(6),
        }
    }

    /// Gold owed every turn the unit stays on the board.
    pub fn upkeep(self) -> u32 {
        match self {
            UnitKind::Capitol => 0,
            UnitKind::Soldier => 1,
            UnitKind::Knight => 2,
        }
    }

    pub fn is_mobile(self) -> bool {
        self.movement() > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub owner: PlayerId,
    pub kind: UnitKind,
    pub lives: u8,
    /// Already moved, attacked or was recruited this turn.
    pub exhausted: bool,
}

impl Unit {
    pub fn new(owner: PlayerId, kind: UnitKind) -> Self {
        let lives = match kind {
            UnitKind::Capitol => CAPITOL_LIVES,
            _ => 1,
        };
        Self {
            owner,
            kind,
            lives,
            exhausted: false,
        }
    }

    /// Material value used to score unfinished games.
    pub fn worth(&self) -> f64 {
        match self.kind {
            UnitKind::Capitol => 2.0 * self.lives as f64,
            kind => kind.strength() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    /// Defender destroyed, attacker takes the hex.
    Victory,
    /// Both survive, attacker stops next to the defender.
    Draw,
    /// Attacker destroyed.
    Defeat,
    /// Defender is a capitol and loses a life.
    AttackCapitol,
}

pub fn combat_result(attacker: UnitKind, defender: UnitKind) -> CombatResult {
    if defender == UnitKind::Capitol {
        return CombatResult::AttackCapitol;
    }
    match attacker.strength().cmp(&defender.strength()) {
        std::cmp::Ordering::Greater => CombatResult::Victory,
        std::cmp::Ordering::Equal => CombatResult::Draw,
        std::cmp::Ordering::Less => CombatResult::Defeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_table() {
        use UnitKind::*;
        assert_eq!(combat_result(Knight, Soldier), CombatResult::Victory);
        assert_eq!(combat_result(Soldier, Soldier), CombatResult::Draw);
        assert_eq!(combat_result(Soldier, Knight), CombatResult::Defeat);
        assert_eq!(combat_result(Soldier, Capitol), CombatResult::AttackCapitol);
    }

    #[test]
    fn test_new_units() {
        let capitol = Unit::new(1, UnitKind::Capitol);
        assert_eq!(capitol.lives, CAPITOL_LIVES);
        assert!(!capitol.kind.is_mobile());
        assert_eq!(capitol.worth(), 6.0);

        let knight = Unit::new(0, UnitKind::Knight);
        assert_eq!(knight.lives, 1);
        assert!(!knight.exhausted);
        assert_eq!(knight.kind.cost(), Some(6));
        assert_eq!(knight.kind.upkeep(), 2);
        assert_eq!(capitol.kind.upkeep(), 0);
    }
}
