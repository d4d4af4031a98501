//! GeoGraph incremental-insert builder (§4.8, default construction mode).
//!
//! For each new node `q`: gather a candidate pool from the existing graph
//! (a BFS walk from the current entry point, collecting `(E,S)` pairs
//! relative to `q`), run [`geo2neighbor`] to pick up to `max_m` neighbors
//! with their α-usability, then `InterInsert` the reciprocal edge into
//! each picked neighbor's *shared* adjacency and immediately re-prune that
//! neighbor back down to `max_m` — folding the source material's
//! two-phase "insert all reciprocals, then re-prune everyone" into one
//! pass per neighbor, since nothing downstream of this insertion can see
//! the intermediate over-full state.

use crate::config::GeoGraphConfig;
use crate::dataset::Dataset;
use crate::distance::DistanceKind;
use crate::index::geograph::prune::geo2neighbor;
use crate::index::geograph::store::{GeoEdge, GeoNodeStore};
use crate::index::node::NodeId;
use crate::index::skyline::SkylinePoint;
use crate::index::visited::VisitedSet;

fn es_between(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    a: NodeId,
    b: NodeId,
) -> (f32, f32) {
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let e = e_kind.distance(dataset.embedding(a), dataset.embedding(b), d_e);
    let s = s_kind.distance(dataset.location(a), dataset.location(b), d_s);
    (e, s)
}

/// BFS-gathers up to `ef_construction` candidates reachable from
/// `entry_points`, scoring each relative to `q`. Not itself skyline
/// ordered — the layering happens inside `geo2neighbor`'s `SkylineQueue`.
fn gather_candidates(
    store: &GeoNodeStore,
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    q: NodeId,
    entry_points: &[NodeId],
    ef_construction: usize,
    visited: &mut VisitedSet,
) -> Vec<SkylinePoint> {
    visited.reset();
    let mut collected = Vec::new();
    let mut queue: Vec<NodeId> = Vec::new();

    for &ep in entry_points {
        if ep != q && visited.mark_visited(ep) {
            let (e, s) = es_between(dataset, e_kind, s_kind, q, ep);
            collected.push(SkylinePoint { id: ep, e, s });
            queue.push(ep);
        }
    }

    while let Some(cur) = queue.pop() {
        if collected.len() >= ef_construction {
            break;
        }
        for edge in store.edges(cur) {
            if edge.id != q && visited.mark_visited(edge.id) {
                let (e, s) = es_between(dataset, e_kind, s_kind, q, edge.id);
                collected.push(SkylinePoint { id: edge.id, e, s });
                queue.push(edge.id);
            }
        }
    }

    collected
}

/// Re-runs `Geo2Neighbor` for `target`'s own pool after a new candidate
/// (the reciprocal edge back to the node that just linked to it) joins,
/// capping the result at `max_m`.
fn reprune_with_candidate(
    store: &GeoNodeStore,
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    target: NodeId,
    new_candidate: SkylinePoint,
    config: &GeoGraphConfig,
) {
    let mut pool: Vec<SkylinePoint> = store
        .edges(target)
        .into_iter()
        .map(|e| SkylinePoint { id: e.id, e: e.e, s: e.s })
        .collect();
    pool.push(new_candidate);

    let selected = geo2neighbor(pool, config.max_m, config.accept_threshold, |a, b| {
        es_between(dataset, e_kind, s_kind, a, b)
    });

    let edges: Vec<GeoEdge> = selected
        .into_iter()
        .map(|n| GeoEdge {
            id: n.id,
            e: n.e,
            s: n.s,
            usability: n.usability,
        })
        .collect();
    tracing::trace!(target, degree = edges.len(), "inter-insert reprune");
    store.set_edges(target, edges);
}

/// Builds a GeoGraph over every id in `dataset` via incremental insert.
#[must_use]
#[tracing::instrument(skip(dataset, config), fields(n = dataset.len(), max_m = config.max_m))]
pub fn build(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: &GeoGraphConfig,
) -> GeoNodeStore {
    let n = dataset.len();
    let store = GeoNodeStore::new(n);
    let mut visited = VisitedSet::new(n);

    for q in 0..n {
        store.ensure_entry_point(q);
        let Some(entry) = store.entry_point() else {
            continue;
        };
        if entry == q {
            continue;
        }

        let candidates = gather_candidates(
            &store,
            dataset,
            e_kind,
            s_kind,
            q,
            &[entry],
            config.ef_construction,
            &mut visited,
        );
        if candidates.is_empty() {
            continue;
        }

        let selected = geo2neighbor(candidates, config.max_m, config.accept_threshold, |a, b| {
            es_between(dataset, e_kind, s_kind, a, b)
        });

        let edges: Vec<GeoEdge> = selected
            .iter()
            .map(|n| GeoEdge {
                id: n.id,
                e: n.e,
                s: n.s,
                usability: n.usability.clone(),
            })
            .collect();
        tracing::trace!(q, accepted = edges.len(), "geograph edge set accepted");
        store.set_edges(q, edges);

        for n in &selected {
            let reciprocal = SkylinePoint { id: q, e: n.e, s: n.s };
            reprune_with_candidate(&store, dataset, e_kind, s_kind, n.id, reciprocal, config);
        }
    }

    tracing::debug!(n, "geograph build complete");
    store
}

#[cfg(test)]
mod builder_tests;
