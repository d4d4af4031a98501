//! `SearchAtLayer`: the best-first beam shared by the NSW/NSW-V2 and HNSW
//! builders and routers (§4.6).
//!
//! Maintains a closer-first frontier and a farther-first, `ef`-bounded
//! result set. Pops the closest unexpanded candidate; stops once it's no
//! closer than the current worst kept result. Neighbors are expanded
//! through a per-call [`VisitedSet`] so the same beam call never revisits
//! an id twice.

use crate::index::heap::{CloserFirstHeap, FartherFirstHeap};
use crate::index::node::{NodeId, NodeStore};
use crate::index::visited::VisitedSet;

/// Runs the shared best-first beam at `layer`, starting from
/// `entry_points`, expanding through `store`'s adjacency, scoring
/// candidates with `dist`, and keeping the `ef` closest results.
///
/// Returns results closer-first.
pub fn search_at_layer(
    store: &NodeStore,
    layer: usize,
    entry_points: &[NodeId],
    dist: impl Fn(NodeId) -> f32,
    ef: usize,
    visited: &mut VisitedSet,
) -> Vec<(NodeId, f32)> {
    let mut frontier = CloserFirstHeap::new();
    let mut results = FartherFirstHeap::new(ef);

    for &ep in entry_points {
        if visited.mark_visited(ep) {
            let d = dist(ep);
            frontier.push(ep, d);
            results.push(ep, d);
        }
    }

    while let Some((c_id, c_dist)) = frontier.pop() {
        if results.is_full() && c_dist > results.worst_distance() {
            break;
        }
        for n in store.neighbors(c_id, layer) {
            if visited.mark_visited(n) {
                let d = dist(n);
                if !results.is_full() || d < results.worst_distance() {
                    frontier.push(n, d);
                    results.push(n, d);
                }
            }
        }
    }

    results.into_sorted_vec()
}

#[cfg(test)]
mod beam_tests;
