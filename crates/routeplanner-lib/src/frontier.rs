//! Open set for the A* search.
//!
//! The frontier is a push-only binary min-heap keyed by `g + h`. Entries are
//! never re-prioritised in place; a node pushed twice pops twice.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::model::NodeId;

/// Priority queue of discovered nodes ordered by estimated total cost.
///
/// The smallest `g + h` pops first. Equal estimates pop in insertion order.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `node` with its cost so far and heuristic estimate.
    pub fn push(&mut self, node: NodeId, g_value: f64, h_value: f64) {
        self.heap.push(FrontierEntry {
            node,
            estimate: FloatOrd(g_value + h_value),
            sequence: self.pushed,
        });
        self.pushed += 1;
    }

    /// Remove and return the node with the smallest estimate.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued entry and restart the insertion sequence.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.pushed = 0;
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: NodeId,
    estimate: FloatOrd,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate,
        // then by insertion order.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
