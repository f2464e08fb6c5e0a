//! Map generation.
//!
//! A world is a hexagon of hexes around the origin with random holes punched
//! into it. Spawn points sit near the rim and are never removed.

use crate::hex::{Hex, HexCoordinate, DIRECTIONS};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Hexes from the center to the rim.
    /// Default: 4
    pub radius: u32,

    /// Probability that a hex is left out of the map.
    /// Default: 0.15
    pub obstacle_ratio: f64,

    /// Number of players, between 2 and 6.
    /// Default: 2
    pub players: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 4,
            obstacle_ratio: 0.15,
            players: 2,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.radius < 2 {
            return Err(format!("radius must be at least 2, got {}", self.radius));
        }
        if !(2..=6).contains(&self.players) {
            return Err(format!("players must be between 2 and 6, got {}", self.players));
        }
        if !(0.0..1.0).contains(&self.obstacle_ratio) {
            return Err(format!(
                "obstacle_ratio must be in [0, 1), got {}",
                self.obstacle_ratio
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    radius: u32,
    hexes: HashSet<Hex>,
    spawns: Vec<Hex>,
}

impl World {
    /// Generates a map. Spawn points and their neighbors are always kept.
    pub fn generate(config: &WorldConfig, rng: &mut StdRng) -> Self {
        let spawns = spawn_points(config.radius, config.players);
        let protected: HashSet<Hex> = spawns
            .iter()
            .flat_map(|spawn| spawn.spiral(1))
            .collect();

        let hexes = Hex::ORIGIN
            .spiral(config.radius)
            .into_iter()
            .filter(|hex| protected.contains(hex) || !rng.random_bool(config.obstacle_ratio))
            .collect();

        Self {
            radius: config.radius,
            hexes,
            spawns,
        }
    }

    /// World made of exactly `hexes`, with explicit spawn points.
    pub fn from_hexes(hexes: HashSet<Hex>, spawns: Vec<Hex>) -> Self {
        let radius = hexes
            .iter()
            .map(|hex| hex.distance(&Hex::ORIGIN))
            .max()
            .unwrap_or(0);
        Self {
            radius,
            hexes,
            spawns,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn contains(&self, hex: &Hex) -> bool {
        self.hexes.contains(hex)
    }

    pub fn hexes(&self) -> &HashSet<Hex> {
        &self.hexes
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// One spawn per player, in player order.
    pub fn spawns(&self) -> &[Hex] {
        &self.spawns
    }
}

/// Evenly spread points one step inside the rim.
fn spawn_points(radius: u32, players: usize) -> Vec<Hex> {
    let distance = radius.saturating_sub(1).max(1) as i32;
    (0..players)
        .map(|player| DIRECTIONS[(player * 6 / players.max(1)) % 6].scale(distance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_map_without_obstacles() {
        let config = WorldConfig {
            radius: 3,
            obstacle_ratio: 0.0,
            players: 2,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let world = World::generate(&config, &mut rng);

        assert_eq!(world.len(), 37);
        assert_eq!(world.radius(), 3);
        assert_eq!(world.spawns(), &[Hex::new(2, 0), Hex::new(-2, 0)]);
    }

    #[test]
    fn test_spawns_survive_obstacles() {
        let config = WorldConfig {
            radius: 5,
            obstacle_ratio: 0.9,
            players: 3,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let world = World::generate(&config, &mut rng);

        assert_eq!(world.spawns().len(), 3);
        for spawn in world.spawns() {
            assert!(world.contains(spawn));
            assert!(spawn.ring(1).iter().all(|h| world.contains(h)));
        }
        assert!(world.len() < 91);
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = WorldConfig::default();
        let a = World::generate(&config, &mut StdRng::seed_from_u64(42));
        let b = World::generate(&config, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate() {
        assert!(WorldConfig::default().validate().is_ok());
        let too_many = WorldConfig {
            players: 7,
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
        let too_small = WorldConfig {
            radius: 1,
            ..Default::default()
        };
        assert!(too_small.validate().is_err());
    }
}
