//! NSW / NSW-V2 builder and router (C7): flat greedy insertion over a
//! single layer.
//!
//! Insertion is inherently sequential — each new node's edges depend on
//! the graph state left by every prior insertion — so, unlike the
//! per-row-independent random-init builder, this walks ids one at a time.
//! `NodeStore`'s per-node guards still make every step safe to call from a
//! caller that interleaves insertion with concurrent reads.

use crate::config::NswConfig;
use crate::dataset::Dataset;
use crate::distance::{blend, DistanceKind};
use crate::index::beam::search_at_layer;
use crate::index::node::{NodeId, NodeStore};
use crate::index::visited::VisitedSet;

/// The fixed α probe set NSW-V2 sweeps per insertion (§4.6).
pub const V2_ALPHA_PROBES: [f32; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

fn make_dist<'a>(
    dataset: &'a Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    alpha: f32,
    q: NodeId,
) -> impl Fn(NodeId) -> f32 + 'a {
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    move |id: NodeId| {
        let e = e_kind.distance(dataset.embedding(q), dataset.embedding(id), d_e);
        let s = s_kind.distance(dataset.location(q), dataset.location(id), d_s);
        blend(alpha, e, s)
    }
}

/// Builds an NSW (V1) graph: single build-time α, directed link per pick
/// (q→c and c→q are both added, but only one α's worth of candidates feeds
/// each insertion — see §9's "V1 treated as directed" note).
#[must_use]
#[tracing::instrument(skip(dataset, config), fields(n = dataset.len(), nn = config.nn))]
pub fn build(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: &NswConfig,
) -> NodeStore {
    let n = dataset.len();
    let store = NodeStore::new(n);
    let mut visited = VisitedSet::new(n);

    for q in 0..n {
        store.register(q, 0);
        if q == 0 {
            continue;
        }
        let entry: NodeId = 0;
        visited.reset();
        let dist = make_dist(dataset, e_kind, s_kind, config.alpha_build, q);
        let candidates = search_at_layer(&store, 0, &[entry], dist, config.ef_construction, &mut visited);
        for &(c, _) in candidates.iter().take(config.nn) {
            store.add_friend(q, 0, c, true);
            store.add_friend(c, 0, q, true);
        }
    }

    tracing::debug!(n, "nsw build complete");
    store
}

/// Builds an NSW-V2 graph: sweeps the fixed α probe set per insertion,
/// linking `NN / |A|` candidates from each sweep. Cross-sweep duplicates
/// are rejected by `AddFriend`'s dedup flag, so effective degree may be
/// lower than `NN` when sweeps overlap.
#[must_use]
#[tracing::instrument(skip(dataset, config), fields(n = dataset.len(), nn = config.nn))]
pub fn build_v2(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: &NswConfig,
) -> NodeStore {
    let n = dataset.len();
    let store = NodeStore::new(n);
    let mut visited = VisitedSet::new(n);
    let per_probe = (config.nn / V2_ALPHA_PROBES.len()).max(1);

    for q in 0..n {
        store.register(q, 0);
        if q == 0 {
            continue;
        }
        let entry: NodeId = 0;
        for &alpha in &V2_ALPHA_PROBES {
            visited.reset();
            let dist = make_dist(dataset, e_kind, s_kind, alpha, q);
            let candidates =
                search_at_layer(&store, 0, &[entry], dist, config.ef_construction, &mut visited);
            for &(c, _) in candidates.iter().take(per_probe) {
                store.add_friend(q, 0, c, true);
                store.add_friend(c, 0, q, true);
            }
        }
    }

    tracing::debug!(n, "nsw-v2 build complete");
    store
}

/// NSW router: a single `SearchAtLayer` from node 0, returning the top `k`
/// results closer-first.
#[must_use]
#[tracing::instrument(skip(store, dataset), fields(alpha_query, k))]
pub fn search(
    store: &NodeStore,
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    query_emb: &[f32],
    query_loc: &[f32],
    alpha_query: f32,
    ef_search: usize,
    k: usize,
) -> Vec<(NodeId, f32)> {
    if store.is_empty() {
        return Vec::new();
    }
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let dist = move |id: NodeId| {
        let e = e_kind.distance(query_emb, dataset.embedding(id), d_e);
        let s = s_kind.distance(query_loc, dataset.location(id), d_s);
        blend(alpha_query, e, s)
    };
    let mut visited = VisitedSet::new(store.len());
    let mut results = search_at_layer(store, 0, &[0], dist, ef_search.max(k), &mut visited);
    results.truncate(k);
    results
}

#[cfg(test)]
mod nsw_tests;
