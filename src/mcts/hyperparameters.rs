//! Planner configuration.
//!
//! The search is bounded by wall-clock time, by an iteration count, or by
//! whichever of the two runs out first. Iteration-only budgets make a search
//! reproducible when rollouts are deterministic.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Tunable planner settings, loadable from the application config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Wall-clock budget per planned turn, in seconds.
    /// Default: 1.0
    pub time_budget_secs: f64,

    /// Optional cap on select/expand/simulate/backpropagate iterations.
    /// Default: none
    pub max_iterations: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 1.0,
            max_iterations: None,
        }
    }
}

impl PlannerConfig {
    /// Budget enforced by the driver for one planning episode.
    pub fn budget(&self) -> SearchBudget {
        SearchBudget {
            time: Some(seconds_to_duration(self.time_budget_secs)),
            iterations: self.max_iterations,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.time_budget_secs.is_finite() || self.time_budget_secs < 0.0 {
            return Err(format!(
                "time_budget_secs must be a non-negative number, got {}",
                self.time_budget_secs
            ));
        }
        Ok(())
    }
}

/// Limits checked between search iterations, never inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchBudget {
    pub time: Option<Duration>,
    pub iterations: Option<usize>,
}

impl SearchBudget {
    pub fn wall_clock(seconds: f64) -> Self {
        Self {
            time: Some(seconds_to_duration(seconds)),
            iterations: None,
        }
    }

    pub fn iterations(count: usize) -> Self {
        Self {
            time: None,
            iterations: Some(count),
        }
    }

    pub fn with_iteration_cap(mut self, count: usize) -> Self {
        self.iterations = Some(count);
        self
    }

    /// True once any limit is reached. A budget with no limit at all is
    /// exhausted from the start rather than running forever.
    pub fn is_exhausted(&self, started: Instant, iterations_done: usize) -> bool {
        if self.time.is_none() && self.iterations.is_none() {
            return true;
        }
        if let Some(limit) = self.iterations {
            if iterations_done >= limit {
                return true;
            }
        }
        if let Some(limit) = self.time {
            if started.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}

/// Negative and NaN budgets mean no time at all; oversized ones saturate.
fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX)
}
