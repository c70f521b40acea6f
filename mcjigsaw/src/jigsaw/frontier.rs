//! Priority worklist of pieces waiting for their children to be placed.

use std::collections::BinaryHeap;
use std::cmp::Ordering;


/// A queue where entries with higher priority come first, and entries with the same
/// priority come in the order they were pushed.
#[derive(Debug)]
pub struct PlacementFrontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    /// Sequence number of the next pushed entry.
    seq: u64,
}

impl<T> Default for PlacementFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PlacementFrontier<T> {

    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, value: T, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(FrontierEntry { priority, seq, value });
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        !self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

}

impl<T> Iterator for PlacementFrontier<T> {

    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop().map(|entry| entry.value)
    }

}


#[derive(Debug)]
struct FrontierEntry<T> {
    priority: i32,
    seq: u64,
    value: T,
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> {}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max heap: greater priority first, then lower sequence first.
        self.priority.cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn ordering() {

        let mut frontier = PlacementFrontier::new();
        assert!(!frontier.has_next());

        frontier.push("a", 0);
        frontier.push("b", 5);
        frontier.push("c", 0);
        frontier.push("d", 5);
        frontier.push("e", -1);
        assert_eq!(frontier.len(), 5);

        assert_eq!(frontier.next(), Some("b"));
        assert_eq!(frontier.next(), Some("d"));

        // Entries pushed while iterating are ordered with the remaining ones.
        frontier.push("f", 1);
        frontier.push("g", 0);

        assert_eq!(frontier.by_ref().collect::<Vec<_>>(), ["f", "a", "c", "g", "e"]);
        assert!(frontier.is_empty());

    }

}
