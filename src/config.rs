//! Top-level configuration, loadable from a JSON file.

use crate::game::world::WorldConfig;
use crate::mcts::PlannerConfig;
use crate::{HexSkirmishError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub planner: PlannerConfig,

    /// Full rounds before a match is scored on material.
    /// Default: 30
    pub max_turns: u32,

    /// Seed of the first match; match `i` uses `seed + i`.
    /// Default: 42
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            planner: PlannerConfig::default(),
            max_turns: 30,
            seed: 42,
        }
    }
}

impl AppConfig {
    /// Reads a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate().map_err(HexSkirmishError::Config)?;
        self.planner.validate().map_err(HexSkirmishError::Config)?;
        if self.max_turns == 0 {
            return Err(HexSkirmishError::Config(
                "max_turns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "max_turns": 12, "world": { "radius": 6 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.world.radius, 6);
        assert_eq!(config.world.players, 2);
        assert_eq!(config.planner, PlannerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut config = AppConfig::default();
        config.planner.max_iterations = Some(64);
        config.seed = 7;

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let config = AppConfig {
            max_turns: 0,
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(HexSkirmishError::Config(_)));

        let mut config = AppConfig::default();
        config.planner.time_budget_secs = -1.0;
        assert_matches!(config.validate(), Err(HexSkirmishError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_matches!(AppConfig::load(&path), Err(HexSkirmishError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert_matches!(
            AppConfig::load(&dir.path().join("absent.json")),
            Err(HexSkirmishError::Io(_))
        );
    }
}
