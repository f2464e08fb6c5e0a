pub mod action;
pub mod game_state;
pub mod heuristic;
pub mod match_runner;
pub mod simulate_game;
pub mod unit;
pub mod world;

pub use action::SkirmishAction;
pub use game_state::SkirmishState;
pub use heuristic::PriorityHeuristic;
pub use match_runner::{run_match, run_matches, MatchBatch, MatchReport, MatchRunner};
pub use unit::{combat_result, CombatResult, Unit, UnitKind};
pub use world::{World, WorldConfig};
