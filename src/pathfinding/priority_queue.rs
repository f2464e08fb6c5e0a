use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minimum-priority queue used as the A* frontier.
///
/// Entries with equal priority come out in ascending item order, so searches
/// are reproducible.
#[derive(Debug, Clone)]
pub struct MinQueue<T: Ord> {
    heap: BinaryHeap<Reverse<(u32, T)>>,
}

impl<T: Ord> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, priority: u32, item: T) {
        self.heap.push(Reverse((priority, item)));
    }

    /// Removes and returns the entry with the lowest priority.
    pub fn pop_with_priority(&mut self) -> Option<(u32, T)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.pop_with_priority().map(|(_, item)| item)
    }

    pub fn peek_priority(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse((priority, _))| *priority)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
