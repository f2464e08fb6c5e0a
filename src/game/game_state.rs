//! Skirmish rules behind the planner's [`GameState`] capability.
//!
//! A state is an immutable snapshot: [`GameState::apply`] builds a successor
//! and leaves the receiver untouched. Each snapshot keeps its own pathfinders,
//! one per (origin hex, attack mode), because the traversable set depends on
//! where units stand. A successor starts with none.
//!
//! Rollouts draw from one seeded generator shared by a state and all of its
//! successors, so a search with an iteration budget replays exactly.

use crate::game::action::SkirmishAction;
use crate::game::simulate_game::simulate_game;
use crate::game::unit::{combat_result, CombatResult, Unit, UnitKind};
use crate::game::world::World;
use crate::hex::{Hex, HexCoordinate};
use crate::mcts::{GameState, PlayerId};
use crate::pathfinding::AStar;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Territory hexes worth one gold of income.
pub const HEXES_PER_COIN: u32 = 4;
pub const STARTING_TREASURY: u32 = 3;

#[derive(Debug, Clone)]
pub struct SkirmishState {
    world: Arc<World>,
    units: BTreeMap<Hex, Unit>,
    treasuries: Vec<u32>,
    current_player: PlayerId,
    turn: u32,
    max_turns: u32,
    pathfinders: RefCell<HashMap<(Hex, bool), AStar<Hex>>>,
    rollout_rng: Arc<Mutex<StdRng>>,
}

impl SkirmishState {
    /// Opening position: a capitol on every spawn and a soldier beside it,
    /// facing the center.
    pub fn new(world: Arc<World>, max_turns: u32) -> Self {
        let mut units = BTreeMap::new();
        for (player, &spawn) in world.spawns().iter().enumerate() {
            units.insert(spawn, Unit::new(player, UnitKind::Capitol));
            let inward = spawn
                .ring(1)
                .into_iter()
                .filter(|hex| world.contains(hex) && !units.contains_key(hex))
                .min_by_key(|hex| (hex.distance(&Hex::ORIGIN), *hex));
            if let Some(hex) = inward {
                units.insert(hex, Unit::new(player, UnitKind::Soldier));
            }
        }
        let players = world.spawns().len();
        Self::with_units(world, units, players, max_turns)
    }

    /// State with an explicit unit layout; player 0 to move on turn 0.
    pub fn with_units(
        world: Arc<World>,
        units: BTreeMap<Hex, Unit>,
        players: usize,
        max_turns: u32,
    ) -> Self {
        Self {
            world,
            units,
            treasuries: vec![STARTING_TREASURY; players],
            current_player: 0,
            turn: 0,
            max_turns,
            pathfinders: RefCell::new(HashMap::new()),
            rollout_rng: Arc::new(Mutex::new(StdRng::seed_from_u64(0))),
        }
    }

    /// Reseeds the rollout generator shared with every successor.
    pub fn with_rollout_seed(mut self, seed: u64) -> Self {
        self.rollout_rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn units(&self) -> &BTreeMap<Hex, Unit> {
        &self.units
    }

    pub fn unit_at(&self, hex: &Hex) -> Option<&Unit> {
        self.units.get(hex)
    }

    pub fn players(&self) -> usize {
        self.treasuries.len()
    }

    pub fn treasury(&self, player: PlayerId) -> u32 {
        self.treasuries.get(player).copied().unwrap_or(0)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn capitol_of(&self, player: PlayerId) -> Option<Hex> {
        self.units
            .iter()
            .find(|(_, unit)| unit.owner == player && unit.kind == UnitKind::Capitol)
            .map(|(hex, _)| *hex)
    }

    /// Players still holding a capitol.
    pub fn alive_players(&self) -> Vec<PlayerId> {
        (0..self.players())
            .filter(|&player| self.capitol_of(player).is_some())
            .collect()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.alive_players().as_slice() {
            [last] => Some(*last),
            _ => None,
        }
    }

    /// Material held by `player`.
    pub fn worth(&self, player: PlayerId) -> f64 {
        self.units
            .values()
            .filter(|unit| unit.owner == player)
            .map(Unit::worth)
            .sum()
    }

    /// Outcome for `player`: 1 for a win, 0 for elimination or a loss,
    /// otherwise the player's share of all material on the board.
    pub fn score(&self, player: PlayerId) -> f64 {
        if let Some(winner) = self.winner() {
            return if winner == player { 1.0 } else { 0.0 };
        }
        if self.capitol_of(player).is_none() {
            return 0.0;
        }
        let total: f64 = self.units.values().map(Unit::worth).sum();
        if total > 0.0 {
            self.worth(player) / total
        } else {
            0.0
        }
    }

    /// Shortest path between two hexes for a unit standing on `from`, goal
    /// first. Attack mode lets the goal be an occupied hex.
    pub fn find_path(&self, from: Hex, to: Hex, attack: bool) -> Vec<Hex> {
        let mut pathfinders = self.pathfinders.borrow_mut();
        let pathfinder = pathfinders
            .entry((from, attack))
            .or_insert_with(|| AStar::new(self.traversable_from(from), attack));
        pathfinder.find_path(from, to)
    }

    /// Hexes walked by the acting unit of `action`, in travel order.
    pub fn route_for(&self, action: &SkirmishAction) -> Vec<Hex> {
        let mut path = match *action {
            SkirmishAction::MoveTo { from, to } => self.find_path(from, to, false),
            SkirmishAction::AttackTo { from, to } => self.find_path(from, to, true),
            SkirmishAction::AttackBounceTo { from, to, .. } => self.find_path(from, to, false),
            SkirmishAction::RecruitAt { .. } | SkirmishAction::EndTurn => Vec::new(),
        };
        path.reverse();
        path
    }

    /// Owner of every map hex: the player of the unit closest to it by walking
    /// distance. Hexes equally close to units of two players stay neutral.
    pub fn territories(&self) -> HashMap<Hex, Option<PlayerId>> {
        let mut claims: HashMap<Hex, (u32, Option<PlayerId>)> = HashMap::new();
        let mut frontier = VecDeque::new();
        for (&hex, unit) in &self.units {
            claims.insert(hex, (0, Some(unit.owner)));
            frontier.push_back(hex);
        }

        while let Some(hex) = frontier.pop_front() {
            let Some(&(distance, owner)) = claims.get(&hex) else {
                continue;
            };
            for neighbor in hex.ring(1) {
                if !self.world.contains(&neighbor) {
                    continue;
                }
                match claims.get_mut(&neighbor) {
                    None => {
                        claims.insert(neighbor, (distance + 1, owner));
                        frontier.push_back(neighbor);
                    }
                    // reached at the same distance from another player
                    Some((reached, claim)) if *reached == distance + 1 && *claim != owner => {
                        *claim = None;
                    }
                    Some(_) => {}
                }
            }
        }

        claims
            .into_iter()
            .map(|(hex, (_, owner))| (hex, owner))
            .collect()
    }

    /// Hexes owned by `player`.
    pub fn territory_size(&self, player: PlayerId) -> u32 {
        self.territories()
            .values()
            .filter(|owner| **owner == Some(player))
            .count() as u32
    }

    /// Gold earned at the end of `player`'s turn before upkeep.
    pub fn income(&self, player: PlayerId) -> u32 {
        self.territory_size(player) / HEXES_PER_COIN
    }

    /// Gold paid at the end of `player`'s turn for their army.
    pub fn upkeep(&self, player: PlayerId) -> u32 {
        self.units
            .values()
            .filter(|unit| unit.owner == player)
            .map(|unit| unit.kind.upkeep())
            .sum()
    }

    /// Empty map hexes plus the mover's own hex.
    fn traversable_from(&self, from: Hex) -> HashSet<Hex> {
        self.world
            .hexes()
            .iter()
            .filter(|hex| **hex == from || !self.units.contains_key(hex))
            .copied()
            .collect()
    }

    fn successor(&self) -> Self {
        Self {
            world: Arc::clone(&self.world),
            units: self.units.clone(),
            treasuries: self.treasuries.clone(),
            current_player: self.current_player,
            turn: self.turn,
            max_turns: self.max_turns,
            pathfinders: RefCell::new(HashMap::new()),
            rollout_rng: Arc::clone(&self.rollout_rng),
        }
    }

    fn unit_actions(&self, from: Hex, unit: Unit, actions: &mut Vec<SkirmishAction>) {
        let movement = unit.kind.movement();

        for radius in 1..=movement {
            for to in from.ring(radius) {
                if !self.world.contains(&to) || self.units.contains_key(&to) {
                    continue;
                }
                let path = self.find_path(from, to, false);
                if !path.is_empty() && path.len() as u32 - 1 <= movement {
                    actions.push(SkirmishAction::MoveTo { from, to });
                }
            }
        }

        let reach = movement + 1;
        for (&target, defender) in &self.units {
            if defender.owner == unit.owner || from.distance(&target) > reach {
                continue;
            }
            let path = self.find_path(from, target, true);
            if path.is_empty() || path.len() as u32 - 1 > reach {
                continue;
            }
            if defender.kind == UnitKind::Capitol && defender.lives > 1 {
                actions.push(SkirmishAction::AttackBounceTo {
                    from,
                    to: path[1],
                    target,
                });
            } else {
                actions.push(SkirmishAction::AttackTo { from, to: target });
            }
        }
    }

    fn recruit_actions(&self, player: PlayerId, actions: &mut Vec<SkirmishAction>) {
        let Some(capitol) = self.capitol_of(player) else {
            return;
        };
        for kind in UnitKind::RECRUITABLE {
            let affordable = kind.cost().is_some_and(|cost| self.treasury(player) >= cost);
            if !affordable {
                continue;
            }
            for hex in capitol.ring(1) {
                if self.world.contains(&hex) && !self.units.contains_key(&hex) {
                    actions.push(SkirmishAction::RecruitAt { hex, kind });
                }
            }
        }
    }

    fn relocate(&mut self, from: Hex, to: Hex) {
        if let Some(mut unit) = self.units.remove(&from) {
            unit.exhausted = true;
            self.units.insert(to, unit);
        }
    }

    /// Attacker on `from` walks to `penult` and strikes `target`.
    fn resolve_attack(&mut self, from: Hex, penult: Hex, target: Hex) {
        let Some(mut attacker) = self.units.remove(&from) else {
            return;
        };
        attacker.exhausted = true;
        let Some(defender) = self.units.get(&target).copied() else {
            self.units.insert(penult, attacker);
            return;
        };

        match combat_result(attacker.kind, defender.kind) {
            CombatResult::Victory => {
                self.units.insert(target, attacker);
            }
            CombatResult::Draw => {
                self.units.insert(penult, attacker);
            }
            CombatResult::Defeat => {}
            CombatResult::AttackCapitol if defender.lives > 1 => {
                if let Some(capitol) = self.units.get_mut(&target) {
                    capitol.lives -= 1;
                }
                self.units.insert(penult, attacker);
            }
            CombatResult::AttackCapitol => {
                // the fallen player leaves the board entirely
                self.units.retain(|_, unit| unit.owner != defender.owner);
                self.units.insert(target, attacker);
            }
        }
    }

    fn recruit(&mut self, hex: Hex, kind: UnitKind) {
        let player = self.current_player;
        let cost = kind.cost().unwrap_or(0);
        if let Some(treasury) = self.treasuries.get_mut(player) {
            *treasury = treasury.saturating_sub(cost);
        }
        let mut unit = Unit::new(player, kind);
        unit.exhausted = true;
        self.units.insert(hex, unit);
    }

    fn end_turn(&mut self) {
        let player = self.current_player;
        for unit in self.units.values_mut().filter(|unit| unit.owner == player) {
            unit.exhausted = false;
        }
        let income = self.income(player);
        let upkeep = self.upkeep(player);
        if let Some(treasury) = self.treasuries.get_mut(player) {
            *treasury = (*treasury + income).saturating_sub(upkeep);
        }

        let players = self.players();
        let mut next = player;
        for _ in 0..players {
            next = (next + 1) % players;
            if next == 0 {
                self.turn += 1;
            }
            if self.capitol_of(next).is_some() {
                break;
            }
        }
        self.current_player = next;
    }
}

impl GameState for SkirmishState {
    type Action = SkirmishAction;

    fn legal_actions(&self) -> Vec<SkirmishAction> {
        if self.is_terminal() {
            return Vec::new();
        }
        let player = self.current_player;
        let mut actions = Vec::new();

        let ready: Vec<(Hex, Unit)> = self
            .units
            .iter()
            .filter(|(_, unit)| unit.owner == player && unit.kind.is_mobile() && !unit.exhausted)
            .map(|(hex, unit)| (*hex, *unit))
            .collect();
        for (from, unit) in ready {
            self.unit_actions(from, unit, &mut actions);
        }
        self.recruit_actions(player, &mut actions);
        actions.push(SkirmishAction::EndTurn);
        actions
    }

    fn is_terminal(&self) -> bool {
        self.turn >= self.max_turns || self.alive_players().len() <= 1
    }

    fn rollout(&self, player: PlayerId) -> f64 {
        let mut rng = match self.rollout_rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        simulate_game(self, player, &mut rng)
    }

    fn apply(&self, action: &SkirmishAction) -> Self {
        let mut next = self.successor();
        match *action {
            SkirmishAction::MoveTo { from, to } => next.relocate(from, to),
            SkirmishAction::AttackTo { from, to } => {
                let path = self.find_path(from, to, true);
                let penult = path.get(1).copied().unwrap_or(from);
                next.resolve_attack(from, penult, to);
            }
            SkirmishAction::AttackBounceTo { from, to, target } => {
                next.resolve_attack(from, to, target)
            }
            SkirmishAction::RecruitAt { hex, kind } => next.recruit(hex, kind),
            SkirmishAction::EndTurn => next.end_turn(),
        }
        next
    }
}
