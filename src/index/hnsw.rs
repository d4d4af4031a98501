//! HNSW builder and router (C8): hierarchical descent plus the
//! neighbor-heuristic (RNG-style) prune.
//!
//! Insertion follows §4.7 exactly: pure-greedy single-hop descent from the
//! entry point down to `cur_level + 1`, then a beam search per layer from
//! `min(max_level, cur_level)` down to 0, each layer's candidates capped by
//! the heuristic prune before linking. A `max_level_guard` serializes any
//! insertion that would grow the graph's top level, matching the two-level
//! lock hierarchy in §9: acquire the guard before any per-node locks, and
//! always link the lower id first to avoid deadlocking the reciprocal
//! `Link(a,b)` / `Link(b,a)` pair.

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::HnswConfig;
use crate::dataset::Dataset;
use crate::distance::{blend, DistanceKind};
use crate::index::beam::search_at_layer;
use crate::index::node::{NodeId, NodeStore};
use crate::index::visited::VisitedSet;

/// Draws a random level via `L = floor(-ln(U(0,1]) * level_mult)`, clamping
/// `U` away from 0 so the log never diverges to `-inf`.
fn random_level(rng: &mut SmallRng, level_mult: f64) -> usize {
    let u: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    (-u.ln() * level_mult).floor() as usize
}

/// RNG-style neighbor-heuristic prune (§4.7): admits a candidate only if
/// it's closer to `q` than to every previously-admitted neighbor.
/// `candidates` must carry `dist(q, candidate)`; `dist_between` scores any
/// two candidate ids directly.
fn select_neighbors_heuristic(
    candidates: &[(NodeId, f32)],
    cap: usize,
    dist_between: impl Fn(NodeId, NodeId) -> f32,
) -> Vec<NodeId> {
    let mut closer_first = candidates.to_vec();
    closer_first.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut accepted: Vec<NodeId> = Vec::with_capacity(cap);
    for &(c, dist_qc) in &closer_first {
        if accepted.len() >= cap {
            break;
        }
        let diverse = accepted
            .iter()
            .all(|&a| dist_qc <= dist_between(a, c));
        if diverse {
            accepted.push(c);
        }
    }
    accepted
}

/// Owns the node store plus the max-level guard serializing top-growth
/// insertions, so construction can be driven one id at a time (by a
/// sequential build loop, or by a caller streaming inserts concurrently).
pub struct HnswBuilder {
    store: NodeStore,
    max_level_guard: Mutex<()>,
}

impl HnswBuilder {
    /// Creates an empty builder pre-sized to `capacity` ids.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            store: NodeStore::new(capacity),
            max_level_guard: Mutex::new(()),
        }
    }

    /// Read-only access to the underlying node store (for routing or
    /// export once construction completes).
    #[must_use]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Inserts node `q` at `level`, wiring it into every layer from
    /// `min(max_level, level)` down to 0.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        q: NodeId,
        level: usize,
        dataset: &Dataset,
        e_kind: DistanceKind,
        s_kind: DistanceKind,
        config: &HnswConfig,
        visited: &mut VisitedSet,
    ) {
        let d_e = dataset.embedding_dim();
        let d_s = dataset.location_dim();
        let alpha = config.alpha_build;
        let dist_to = |a: NodeId, b: NodeId| {
            let e = e_kind.distance(dataset.embedding(a), dataset.embedding(b), d_e);
            let s = s_kind.distance(dataset.location(a), dataset.location(b), d_s);
            blend(alpha, e, s)
        };

        let Some(entry) = self.store.entry_point() else {
            self.store.register(q, level);
            return;
        };

        let current_max = self.store.max_level();
        let _guard = if level > current_max {
            Some(self.max_level_guard.lock())
        } else {
            None
        };

        self.store.register(q, level);

        // Pure-greedy single-hop descent from max_level down to level+1.
        let mut descent_point = entry;
        for layer in (level + 1..=current_max).rev() {
            loop {
                let mut best = descent_point;
                let mut best_dist = dist_to(q, best);
                let mut improved = false;
                for n in self.store.neighbors(descent_point, layer) {
                    let d = dist_to(q, n);
                    if d < best_dist {
                        best = n;
                        best_dist = d;
                        improved = true;
                    }
                }
                descent_point = best;
                if !improved {
                    break;
                }
            }
        }

        // Beam + heuristic prune from min(max_level, level) down to 0.
        let top = level.min(current_max);
        let mut ep = descent_point;
        for layer in (0..=top).rev() {
            visited.reset();
            let candidates =
                search_at_layer(&self.store, layer, &[ep], |n| dist_to(q, n), config.ef_construction, visited);

            let cap = if layer == 0 { config.max_m0 } else { config.max_m };
            let selected = select_neighbors_heuristic(&candidates, cap, |a, b| dist_to(a, b));

            for &s in &selected {
                self.link(q, s, layer, cap, &dist_to);
                self.link(s, q, layer, cap, &dist_to);
            }

            if let Some(&(closest, _)) = candidates.first() {
                ep = closest;
            }
        }
    }

    /// Adds a directed edge `from -> to` at `layer`, shrinking via the
    /// heuristic prune if the resulting degree exceeds `cap`.
    fn link(&self, from: NodeId, to: NodeId, layer: usize, cap: usize, dist_to: &impl Fn(NodeId, NodeId) -> f32) {
        if !self.store.add_friend(from, layer, to, true) {
            return;
        }
        let neighbors = self.store.neighbors(from, layer);
        if neighbors.len() <= cap {
            return;
        }
        let scored: Vec<(NodeId, f32)> = neighbors.iter().map(|&n| (n, dist_to(from, n))).collect();
        let pruned = select_neighbors_heuristic(&scored, cap, |a, b| dist_to(a, b));
        tracing::trace!(node = from, layer, before = scored.len(), after = pruned.len(), "shrink triggered");
        self.store.set_neighbors(from, layer, pruned);
    }
}

/// Builds an HNSW graph over every id in `dataset`, assigning each a
/// random level from a seeded RNG before inserting it.
#[must_use]
#[tracing::instrument(skip(dataset, config), fields(n = dataset.len(), max_m = config.max_m))]
pub fn build(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: &HnswConfig,
) -> NodeStore {
    let n = dataset.len();
    let builder = HnswBuilder::new(n);
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut visited = VisitedSet::new(n);
    let level_mult = config.level_mult();

    for q in 0..n {
        let level = random_level(&mut rng, level_mult);
        builder.insert(q, level, dataset, e_kind, s_kind, config, &mut visited);
    }

    tracing::debug!(n, max_level = builder.store.max_level(), "hnsw build complete");
    builder.store
}

/// HNSW router (§4.9): greedy descent above layer 0 recording an
/// "ensure-K path", then repeated `SearchAtLayer` seeds from that path
/// until the result set reaches `k` entries.
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
    let Some(entry) = store.entry_point() else {
        return Vec::new();
    };
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let dist = move |id: NodeId| {
        let e = e_kind.distance(query_emb, dataset.embedding(id), d_e);
        let s = s_kind.distance(query_loc, dataset.location(id), d_s);
        blend(alpha_query, e, s)
    };

    let max_level = store.max_level();
    let mut path = vec![entry];
    let mut current = entry;
    let mut current_dist = dist(current);
    for layer in (1..=max_level).rev() {
        loop {
            let mut improved = false;
            for n in store.neighbors(current, layer) {
                let d = dist(n);
                if d < current_dist {
                    current = n;
                    current_dist = d;
                    improved = true;
                }
            }
            if improved {
                path.push(current);
            } else {
                break;
            }
        }
    }

    let ef = ef_search.max(k);
    let mut visited = VisitedSet::new(store.len());
    let mut results: Vec<(NodeId, f32)> = Vec::new();
    while results.len() < k {
        let Some(seed) = path.pop() else { break };
        visited.reset();
        let seeded = search_at_layer(store, 0, &[seed], &dist, ef, &mut visited);
        for cand in seeded {
            if !results.iter().any(|&(id, _)| id == cand.0) {
                results.push(cand);
            }
        }
        if path.is_empty() {
            break;
        }
    }
    results.sort_by(|a, b| a.1.total_cmp(&b.1));
    results.truncate(k);
    results
}

#[cfg(test)]
mod hnsw_tests;
