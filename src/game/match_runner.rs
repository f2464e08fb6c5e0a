//! AI-vs-AI matches.
//!
//! The runner owns the current map and the terrain pathfinder bound to it.
//! Candidate maps are checked on a scratch pathfinder; the terrain pathfinder
//! is rebound only once a map is accepted, which drops every cached path from
//! the previous map.
//!
//! A match is reproducible from its seed when the planner runs on an
//! iteration budget: the map, the expansion heuristic and the rollouts all
//! draw from generators seeded with it.

use crate::config::AppConfig;
use crate::game::action::SkirmishAction;
use crate::game::game_state::SkirmishState;
use crate::game::heuristic::PriorityHeuristic;
use crate::game::world::World;
use crate::hex::Hex;
use crate::mcts::{ExpansionHeuristic, GameState, PlayerId, TurnPlanner};
use crate::pathfinding::AStar;
use crate::{HexSkirmishError, Result};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Maps rejected before giving up on the configuration.
pub const MAX_MAP_ATTEMPTS: u32 = 100;

/// Summary of one finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub seed: u64,
    /// Unix timestamp of the match start.
    pub started_at: i64,
    pub map_hexes: usize,
    pub map_attempts: u32,
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub actions_played: usize,
    pub planning_iterations: usize,
    /// Material each player holds at the end.
    pub final_worth: Vec<f64>,
}

pub struct MatchRunner {
    config: AppConfig,
    seed: u64,
    rng: StdRng,
    world: Arc<World>,
    terrain: AStar<Hex>,
    map_attempts: u32,
}

impl MatchRunner {
    /// Validates the configuration and generates the first map.
    pub fn new(config: AppConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut runner = Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            world: Arc::new(World::from_hexes(HashSet::new(), Vec::new())),
            terrain: AStar::new(HashSet::new(), false),
            map_attempts: 0,
        };
        runner.new_map()?;
        Ok(runner)
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Generates maps until every spawn can reach the first one.
    pub fn new_map(&mut self) -> Result<()> {
        for attempt in 1..=MAX_MAP_ATTEMPTS {
            let world = World::generate(&self.config.world, &mut self.rng);

            if spawns_connected(&world) {
                log::info!(
                    "map ready after {} attempt(s): {} hexes, {} players",
                    attempt,
                    world.len(),
                    world.spawns().len()
                );
                self.world = Arc::new(world);
                self.terrain.rebind(self.world.hexes().clone());
                self.map_attempts = attempt;
                return Ok(());
            }
            log::debug!("map attempt {} rejected: spawns not connected", attempt);
        }
        Err(HexSkirmishError::Game(format!(
            "no connected map after {} attempts",
            MAX_MAP_ATTEMPTS
        )))
    }

    /// Steps between two hexes over open terrain, ignoring units.
    pub fn terrain_distance(&mut self, from: Hex, to: Hex) -> Option<usize> {
        let path = self.terrain.find_path(from, to);
        path.len().checked_sub(1)
    }

    pub fn terrain_cache_len(&self) -> usize {
        self.terrain.cache_len()
    }

    /// Plays a full match where every player plans with MCTS.
    pub fn play<H>(&mut self, planner: &mut TurnPlanner<H>) -> Result<MatchReport>
    where
        H: ExpansionHeuristic<SkirmishAction>,
    {
        let started_at = chrono::Utc::now().timestamp();
        let mut state = SkirmishState::new(Arc::clone(&self.world), self.config.max_turns)
            .with_rollout_seed(self.seed);
        let mut actions_played = 0;
        let mut planning_iterations = 0;

        let opening = match self.world.spawns() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        };
        if let Some((first, second)) = opening {
            if let Some(distance) = self.terrain_distance(first, second) {
                log::debug!("capitols 0 and 1 are {} hexes apart", distance);
            }
        }

        while !state.is_terminal() {
            let player = state.current_player();
            let plan = planner.plan(&state, player)?;
            planning_iterations += plan.iterations;

            for action in &plan.actions {
                if action.origin().is_some() {
                    let route = state.route_for(action);
                    log::trace!("player {}: {} via {:?}", player, action, route);
                }
                state = state.apply(action);
                actions_played += 1;
                if state.is_terminal() {
                    break;
                }
            }
            log::debug!(
                "turn {} player {}: {} actions after {} iterations",
                state.turn(),
                player,
                plan.actions.len(),
                plan.iterations
            );
        }

        let report = MatchReport {
            seed: self.seed,
            started_at,
            map_hexes: self.world.len(),
            map_attempts: self.map_attempts,
            winner: state.winner(),
            turns: state.turn(),
            actions_played,
            planning_iterations,
            final_worth: (0..state.players()).map(|p| state.worth(p)).collect(),
        };
        log::info!(
            "match {} finished on turn {}/{}: winner {:?}",
            self.seed,
            report.turns,
            state.max_turns(),
            report.winner
        );
        Ok(report)
    }
}

/// Every spawn can walk to the first one.
fn spawns_connected(world: &World) -> bool {
    let Some((&first, rest)) = world.spawns().split_first() else {
        return false;
    };
    let mut scratch = AStar::new(world.hexes().clone(), false);
    rest.iter()
        .all(|&spawn| !scratch.find_path(first, spawn).is_empty())
}

/// Reports of a batch of matches, plus the seeds that failed and why.
#[derive(Debug, Clone, Default)]
pub struct MatchBatch {
    pub reports: Vec<MatchReport>,
    pub failures: Vec<(u64, String)>,
}

impl MatchBatch {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs one match with the priority heuristic seeded from `seed`.
pub fn run_match(config: &AppConfig, seed: u64) -> Result<MatchReport> {
    let mut runner = MatchRunner::new(config.clone(), seed)?;
    let mut planner = TurnPlanner::new(config.planner.clone(), PriorityHeuristic::new(seed));
    runner.play(&mut planner)
}

/// Plays `count` matches in parallel, match `i` seeded with `seed + i`.
///
/// Reports and failures both come back in seed order.
pub fn run_matches(config: &AppConfig, count: usize) -> MatchBatch {
    let outcomes: Vec<(u64, std::result::Result<MatchReport, String>)> = (0..count as u64)
        .into_par_iter()
        .map(|i| {
            let seed = config.seed.wrapping_add(i);
            (seed, run_match(config, seed).map_err(|e| e.to_string()))
        })
        .collect();

    let mut batch = MatchBatch::default();
    for (seed, outcome) in outcomes {
        match outcome {
            Ok(report) => batch.reports.push(report),
            Err(e) => {
                log::error!("match {} failed: {}", seed, e);
                batch.failures.push((seed, e));
            }
        }
    }
    batch
}
