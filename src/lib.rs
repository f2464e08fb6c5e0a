//! # Hex Skirmish
//!
//! Planning core for a turn-based strategy game played on a hex grid.
//!
//! ## Features
//!
//! - **Turn planner**: Monte Carlo Tree Search that returns a whole turn as an
//!   ordered list of actions ending with a single end-turn
//! - **Pathfinding**: A* over a traversable hex set with a per-pathfinder
//!   path cache
//! - **Skirmish rules**: a small hex wargame used to drive AI-vs-AI matches
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hex_skirmish::{config::AppConfig, game::run_match};
//!
//! let report = run_match(&AppConfig::default(), 42)?;
//! println!("winner: {:?}", report.winner);
//! # Ok::<(), hex_skirmish::HexSkirmishError>(())
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Application configuration
pub mod config;

/// Skirmish rules and match runner
pub mod game;

/// Axial hex coordinates
pub mod hex;

/// Logger setup
pub mod logging;

/// Monte Carlo Tree Search turn planner
pub mod mcts;

/// Cached A* pathfinding
pub mod pathfinding;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use hex::{Hex, HexCoordinate};
pub use mcts::{
    plan, ExpansionHeuristic, GameState, PlanResult, PlannerConfig, PlannerError, PlayerId,
    TurnAction, TurnPlanner,
};
pub use pathfinding::AStar;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Hex Skirmish library
#[derive(Debug, thiserror::Error)]
pub enum HexSkirmishError {
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Game error: {0}")]
    Game(String),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HexSkirmishError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
