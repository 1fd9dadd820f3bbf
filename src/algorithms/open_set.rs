use crate::grid::Position;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One queued cell. Ordered by `(f_score, order)` so that equal scores pop
/// in insertion order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OpenEntry {
    pub f_score: u32,
    pub order: u64,
    pub pos: Position,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison to make BinaryHeap a min-heap
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Priority queue of cells awaiting expansion, plus a membership set for
/// constant-time "already queued" checks.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    members: FxHashSet<Position>,
    counter: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `pos` and returns the insertion order it was given.
    pub fn push(&mut self, f_score: u32, pos: Position) -> u64 {
        let order = self.counter;
        self.counter += 1;
        self.heap.push(OpenEntry { f_score, order, pos });
        self.members.insert(pos);
        order
    }

    pub fn pop(&mut self) -> Option<OpenEntry> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry)
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.members.contains(pos)
    }

    /// Total number of pushes so far.
    pub fn pushes(&self) -> u64 {
        self.counter
    }
}
