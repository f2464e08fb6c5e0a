//! A* search on a hex grid with memoized results.
//!
//! Edge costs are uniform (one step per hex) and the heuristic is plain hex
//! distance, which is admissible and consistent on such a grid.
//!
//! Paths come back in goal-to-start order, both endpoints included. Callers
//! that need travel order reverse them.

use crate::hex::HexCoordinate;
use crate::pathfinding::path_cache::PathCache;
use crate::pathfinding::priority_queue::MinQueue;
use std::collections::{HashMap, HashSet};

/// Pathfinder bound to one traversable hex set.
#[derive(Debug, Clone)]
pub struct AStar<H: HexCoordinate> {
    traversable: HashSet<H>,
    /// Attack targeting: the goal may sit outside the set (an occupied enemy
    /// hex) as long as it borders a traversable hex.
    allow_goal_outside_set: bool,
    cache: PathCache<H>,
    expansions: u64,
}

impl<H: HexCoordinate> AStar<H> {
    pub fn new(traversable: HashSet<H>, allow_goal_outside_set: bool) -> Self {
        Self {
            traversable,
            allow_goal_outside_set,
            cache: PathCache::new(),
            expansions: 0,
        }
    }

    pub fn traversable(&self) -> &HashSet<H> {
        &self.traversable
    }

    pub fn allows_goal_outside_set(&self) -> bool {
        self.allow_goal_outside_set
    }

    /// Shortest path from `start` to `goal`, goal first.
    ///
    /// Returns an empty vector when the goal cannot be reached.
    pub fn find_path(&mut self, start: H, goal: H) -> Vec<H> {
        if let Some(path) = self.cache.get(start, goal) {
            return path.to_vec();
        }

        let mut frontier = MinQueue::new();
        let mut g_score: HashMap<H, u32> = HashMap::new();
        let mut came_from: HashMap<H, H> = HashMap::new();
        let mut closed: HashSet<H> = HashSet::new();

        g_score.insert(start, 0);
        frontier.push(start.distance(&goal), start);

        while let Some(current) = frontier.pop() {
            if current == goal {
                let path = reconstruct_path(&came_from, current);
                log::trace!(
                    "A* {:?} -> {:?}: {} hexes, {} expansions so far",
                    start,
                    goal,
                    path.len(),
                    self.expansions
                );
                self.cache.insert(start, goal, path.clone());
                return path;
            }
            // stale frontier entry for an already expanded hex
            if !closed.insert(current) {
                continue;
            }
            self.expansions += 1;

            let current_g = g_score.get(&current).copied().unwrap_or(0);
            for neighbor in current.ring(1) {
                if !self.admits(neighbor, goal) || closed.contains(&neighbor) {
                    continue;
                }
                let tentative = current_g + 1;
                if g_score
                    .get(&neighbor)
                    .is_some_and(|&best| tentative >= best)
                {
                    continue;
                }
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                frontier.push(tentative + neighbor.distance(&goal), neighbor);
            }
        }

        log::trace!("A* {:?} -> {:?}: unreachable", start, goal);
        Vec::new()
    }

    /// Drops every memoized path.
    pub fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            log::debug!("path cache invalidated ({} entries)", self.cache.len());
        }
        self.cache.clear();
    }

    /// Binds the pathfinder to a new traversable set. The cache is cleared
    /// since none of its paths are known to hold on the new set.
    pub fn rebind(&mut self, traversable: HashSet<H>) {
        self.traversable = traversable;
        self.invalidate();
    }

    /// Hexes expanded over the pathfinder's lifetime.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }

    fn admits(&self, hex: H, goal: H) -> bool {
        self.traversable.contains(&hex) || (self.allow_goal_outside_set && hex == goal)
    }
}

fn reconstruct_path<H: HexCoordinate>(came_from: &HashMap<H, H>, goal: H) -> Vec<H> {
    let mut path = vec![goal];
    let mut node = goal;
    while let Some(&previous) = came_from.get(&node) {
        path.push(previous);
        node = previous;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Hex;

    fn line(len: i32) -> HashSet<Hex> {
        (0..len).map(|q| Hex::new(q, 0)).collect()
    }

    #[test]
    fn test_straight_line_back_to_front() {
        let mut astar = AStar::new(line(5), false);
        let path = astar.find_path(Hex::new(0, 0), Hex::new(4, 0));

        let expected: Vec<Hex> = (0..5).rev().map(|q| Hex::new(q, 0)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_start_equals_goal() {
        let mut astar = AStar::new(line(3), false);
        assert_eq!(astar.find_path(Hex::new(1, 0), Hex::new(1, 0)), vec![Hex::new(1, 0)]);
    }

    #[test]
    fn test_unreachable_goal_is_empty() {
        let mut astar = AStar::new(line(3), false);
        assert!(astar.find_path(Hex::new(0, 0), Hex::new(6, 0)).is_empty());
        // nothing cached for a failed search
        assert_eq!(astar.cache_len(), 0);
    }

    #[test]
    fn test_goal_outside_set_needs_flag() {
        let goal = Hex::new(3, 0);

        let mut strict = AStar::new(line(3), false);
        assert!(!strict.allows_goal_outside_set());
        assert!(!strict.traversable().contains(&goal));
        assert!(strict.find_path(Hex::new(0, 0), goal).is_empty());

        let mut attack = AStar::new(line(3), true);
        assert!(attack.allows_goal_outside_set());
        let path = attack.find_path(Hex::new(0, 0), goal);
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], goal);
        assert_eq!(path[1], Hex::new(2, 0));
    }

    #[test]
    fn test_relaxed_goal_must_border_the_set() {
        let mut attack = AStar::new(line(3), true);
        assert!(attack.find_path(Hex::new(0, 0), Hex::new(5, 0)).is_empty());
    }

    #[test]
    fn test_routes_around_obstacle() {
        let mut hexes: HashSet<Hex> = Hex::ORIGIN.spiral(3).into_iter().collect();
        // wall across the middle, open only at the top end
        for r in -2..=3 {
            hexes.remove(&Hex::new(0, r));
        }
        let start = Hex::new(-2, 0);
        let goal = Hex::new(2, 0);

        let mut astar = AStar::new(hexes.clone(), false);
        let path = astar.find_path(start, goal);

        assert!(!path.is_empty());
        assert_eq!(path.first(), Some(&goal));
        assert_eq!(path.last(), Some(&start));
        assert!(path.len() > start.distance(&goal) as usize + 1);
        assert!(path.iter().all(|h| hexes.contains(h)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_second_query_hits_cache() {
        let mut astar = AStar::new(line(6), false);
        let first = astar.find_path(Hex::new(0, 0), Hex::new(5, 0));
        let expanded = astar.expansions();
        assert!(expanded > 0);

        let second = astar.find_path(Hex::new(0, 0), Hex::new(5, 0));
        assert_eq!(first, second);
        assert_eq!(astar.expansions(), expanded);
        assert_eq!(astar.cache_hits(), 1);
    }

    #[test]
    fn test_reverse_direction_is_a_separate_entry() {
        let mut astar = AStar::new(line(4), false);
        astar.find_path(Hex::new(0, 0), Hex::new(3, 0));
        let expanded = astar.expansions();

        let back = astar.find_path(Hex::new(3, 0), Hex::new(0, 0));
        assert!(astar.expansions() > expanded);
        assert_eq!(back.first(), Some(&Hex::new(0, 0)));
        assert_eq!(astar.cache_len(), 2);
    }

    #[test]
    fn test_rebind_clears_cache() {
        let mut astar = AStar::new(line(4), false);
        assert_eq!(astar.find_path(Hex::new(0, 0), Hex::new(3, 0)).len(), 4);
        assert_eq!(astar.cache_len(), 1);

        let mut shorter = line(4);
        shorter.remove(&Hex::new(2, 0));
        astar.rebind(shorter);

        assert_eq!(astar.cache_len(), 0);
        assert!(astar.find_path(Hex::new(0, 0), Hex::new(3, 0)).is_empty());
    }
}
