//! Bounded top-K priority queues (C3): farther-first and closer-first
//! ordered heaps over `(NodeId, f32)` candidates.
//!
//! Both wrap `std::collections::BinaryHeap` with [`OrderedFloat`] for IEEE
//! 754 total ordering (`f32::total_cmp`), so a NaN distance can never
//! corrupt heap invariants. Ties on distance break on id, which keeps
//! search runs deterministic given a fixed seed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::index::node::NodeId;

/// Wrapper giving `f32` a total order via `f32::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f32);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    dist: OrderedFloat,
    id: NodeId,
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.cmp(&other.dist).then_with(|| self.id.cmp(&other.id))
    }
}

/// Max-heap by distance, bounded to a fixed capacity: the standard
/// "best-of-ef" result container used during construction and search.
///
/// Pushing past capacity evicts the single farthest candidate, so the heap
/// always holds the `cap` closest candidates seen so far.
#[derive(Debug)]
pub struct FartherFirstHeap {
    heap: BinaryHeap<Candidate>,
    cap: usize,
}

impl FartherFirstHeap {
    /// Creates an empty heap bounded to `cap` entries.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap.max(1)),
            cap,
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// True if the heap is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.cap
    }

    /// Distance of the farthest (worst) entry currently held, or `+inf` if
    /// the heap has not yet reached capacity (anything is an improvement).
    #[must_use]
    pub fn worst_distance(&self) -> f32 {
        if self.is_full() {
            self.heap.peek().map_or(f32::INFINITY, |c| c.dist.0)
        } else {
            f32::INFINITY
        }
    }

    /// Pushes `(id, dist)`, evicting the current worst if over capacity.
    /// Returns `true` if the candidate was accepted (heap not full, or it
    /// beat the previous worst).
    pub fn push(&mut self, id: NodeId, dist: f32) -> bool {
        if self.heap.len() < self.cap {
            self.heap.push(Candidate {
                dist: OrderedFloat(dist),
                id,
            });
            true
        } else if self.cap == 0 {
            false
        } else if dist < self.worst_distance() {
            self.heap.pop();
            self.heap.push(Candidate {
                dist: OrderedFloat(dist),
                id,
            });
            true
        } else {
            false
        }
    }

    /// Drains the heap into a `(id, dist)` vector sorted closer-first.
    ///
    /// `BinaryHeap::into_sorted_vec` yields ascending `Ord` order already,
    /// which for `Candidate` means ascending distance (closer-first), so no
    /// extra reversal is needed.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<(NodeId, f32)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| (c.id, c.dist.0))
            .collect()
    }
}

/// Min-heap by distance: the frontier of candidates still to be expanded
/// during a best-first beam search.
#[derive(Debug, Default)]
pub struct CloserFirstHeap {
    heap: BinaryHeap<std::cmp::Reverse<Candidate>>,
}

impl CloserFirstHeap {
    /// Creates an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pushes a candidate onto the frontier.
    pub fn push(&mut self, id: NodeId, dist: f32) {
        self.heap.push(std::cmp::Reverse(Candidate {
            dist: OrderedFloat(dist),
            id,
        }));
    }

    /// Pops the closest remaining candidate.
    pub fn pop(&mut self) -> Option<(NodeId, f32)> {
        self.heap.pop().map(|std::cmp::Reverse(c)| (c.id, c.dist.0))
    }
}

#[cfg(test)]
mod heap_tests;
