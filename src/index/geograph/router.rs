//! GeoGraph router (§4.9): same best-first shape as the HNSW/NSW routers,
//! specialized to a single layer and gated by each edge's α-usability —
//! an edge `c -> n` is only followed if `alpha_query` falls inside
//! `n`'s cached usability range.

use crate::dataset::Dataset;
use crate::distance::{blend, DistanceKind};
use crate::index::geograph::store::GeoNodeStore;
use crate::index::heap::{CloserFirstHeap, FartherFirstHeap};
use crate::index::node::NodeId;
use crate::index::visited::VisitedSet;

/// Greedy best-first search over a [`GeoNodeStore`], entered from
/// `store.entry_point()`, returning the `k` closest results under the
/// blended distance at `alpha_query`.
#[must_use]
#[tracing::instrument(skip(store, dataset), fields(alpha_query, k))]
pub fn search(
    store: &GeoNodeStore,
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    query_emb: &[f32],
    query_loc: &[f32],
    alpha_query: f32,
    ef_search: usize,
    k: usize,
) -> Vec<(NodeId, f32)> {
    let Some(entry) = store.entry_point() else {
        return Vec::new();
    };
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let dist = |id: NodeId| {
        let e = e_kind.distance(query_emb, dataset.embedding(id), d_e);
        let s = s_kind.distance(query_loc, dataset.location(id), d_s);
        blend(alpha_query, e, s)
    };

    let ef = ef_search.max(k).max(1);
    let mut visited = VisitedSet::new(store.len());
    let mut candidates = CloserFirstHeap::new();
    let mut results = FartherFirstHeap::new(ef);

    visited.mark_visited(entry);
    let entry_dist = dist(entry);
    candidates.push(entry, entry_dist);
    results.push(entry, entry_dist);

    while let Some((cur, cur_dist)) = candidates.pop() {
        if results.is_full() && cur_dist > results.worst_distance() {
            break;
        }
        for edge in store.edges(cur) {
            if !edge.usability.contains(alpha_query) {
                continue;
            }
            if !visited.mark_visited(edge.id) {
                continue;
            }
            let d = dist(edge.id);
            if !results.is_full() || d < results.worst_distance() {
                candidates.push(edge.id, d);
                results.push(edge.id, d);
            }
        }
    }

    let mut out = results.into_sorted_vec();
    out.truncate(k);
    out
}

#[cfg(test)]
mod router_tests;
