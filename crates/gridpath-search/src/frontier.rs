//! Stable min-priority frontier for Dijkstra and A*.
//!
//! Entries are ordered by `(key, insertion_order)`. Lower keys are popped
//! first; ties are broken by insertion order (FIFO), so a node reinserted
//! with an improved key queues behind entries already waiting at that key.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<K> {
    key: K,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
    idx: usize,
}

impl<K: Ord> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<K: Ord> Eq for Entry<K> {}

impl<K: Ord> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then(self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue of node indices.
///
/// Stale entries are not removed on reinsertion; callers compare the popped
/// key against the node's current value and skip mismatches.
#[derive(Debug)]
pub(crate) struct Frontier<K> {
    heap: BinaryHeap<Reverse<Entry<K>>>,
    seq: u64,
}

impl<K: Ord> Frontier<K> {
    /// Create an empty frontier.
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Create an empty frontier with room for `n` entries.
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(n),
            seq: 0,
        }
    }

    /// Queue node `idx` at `key`.
    pub(crate) fn push(&mut self, idx: usize, key: K) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { key, seq, idx }));
    }

    /// Pop the entry with the lowest key, earliest insertion first.
    pub(crate) fn pop(&mut self) -> Option<(usize, K)> {
        self.heap.pop().map(|Reverse(e)| (e.idx, e.key))
    }

    /// Number of queued entries, stale ones included.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
