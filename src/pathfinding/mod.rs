//! Cached A* pathfinding over a traversable hex set.
//!
//! One [`AStar`] is bound to one traversable set. Its [`PathCache`] is owned by
//! the pathfinder and cleared whenever the set is replaced.

pub mod astar;
pub mod path_cache;
pub mod priority_queue;

pub use astar::AStar;
pub use path_cache::PathCache;
pub use priority_queue::MinQueue;
