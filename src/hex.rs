//! Hexagonal grid coordinates.
//!
//! The pathfinder only needs the [`HexCoordinate`] capability (identity,
//! distance and rings). [`Hex`] is the axial implementation used by the
//! skirmish rules and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

/// Capability required from a grid position by the A* pathfinder.
pub trait HexCoordinate: Copy + Eq + Hash + Ord + Debug {
    /// Number of steps between two positions on an unobstructed grid.
    fn distance(&self, other: &Self) -> u32;

    /// All positions at exactly `radius` steps, in a deterministic order.
    /// A radius of 0 yields the center alone.
    fn ring(&self, radius: u32) -> Vec<Self>;
}

/// Axial hex coordinate (the cube `s` component is implied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// Unit offsets, counter-clockwise starting east.
pub const DIRECTIONS: [Hex; 6] = [
    Hex { q: 1, r: 0 },
    Hex { q: 1, r: -1 },
    Hex { q: 0, r: -1 },
    Hex { q: -1, r: 0 },
    Hex { q: -1, r: 1 },
    Hex { q: 0, r: 1 },
];

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn add(&self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }

    pub fn scale(&self, factor: i32) -> Hex {
        Hex::new(self.q * factor, self.r * factor)
    }

    /// Neighbor in direction `direction % 6`.
    pub fn neighbor(&self, direction: usize) -> Hex {
        self.add(DIRECTIONS[direction % 6])
    }

    /// Every hex within `radius` steps, center first then ring by ring.
    pub fn spiral(&self, radius: u32) -> Vec<Hex> {
        (0..=radius).flat_map(|k| self.ring(k)).collect()
    }
}

impl HexCoordinate for Hex {
    fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        (dq + dr + ds) / 2
    }

    fn ring(&self, radius: u32) -> Vec<Self> {
        if radius == 0 {
            return vec![*self];
        }
        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut hex = self.add(DIRECTIONS[4].scale(radius as i32));
        for direction in 0..6 {
            for _ in 0..radius {
                results.push(hex);
                hex = hex.neighbor(direction);
            }
        }
        results
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}
