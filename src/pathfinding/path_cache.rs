use std::collections::HashMap;
use std::hash::Hash;

/// Memo table of reconstructed paths keyed by the ordered `(start, goal)` pair.
///
/// `(a, b)` and `(b, a)` are independent entries. Stored paths keep the
/// goal-to-start order produced by backtracking. Entries are only ever
/// dropped all at once through [`PathCache::clear`].
#[derive(Debug, Clone)]
pub struct PathCache<H> {
    entries: HashMap<(H, H), Vec<H>>,
    hits: u64,
}

impl<H> Default for PathCache<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
        }
    }
}

impl<H: Copy + Eq + Hash> PathCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a previous result, counting the hit.
    pub fn get(&mut self, start: H, goal: H) -> Option<&[H]> {
        let path = self.entries.get(&(start, goal))?;
        self.hits += 1;
        Some(path.as_slice())
    }

    pub fn insert(&mut self, start: H, goal: H, path: Vec<H>) {
        self.entries.insert((start, goal), path);
    }

    pub fn contains(&self, start: H, goal: H) -> bool {
        self.entries.contains_key(&(start, goal))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache since construction.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_direction_sensitive() {
        let mut cache = PathCache::new();
        cache.insert(1, 3, vec![3, 2, 1]);

        assert!(cache.contains(1, 3));
        assert!(!cache.contains(3, 1));
        assert_eq!(cache.get(3, 1), None);
        assert_eq!(cache.get(1, 3), Some(&[3, 2, 1][..]));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_clear_drops_every_entry() {
        let mut cache = PathCache::new();
        cache.insert(1, 2, vec![2, 1]);
        cache.insert(2, 1, vec![1, 2]);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(1, 2), None);
    }
}
