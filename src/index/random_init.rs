//! Random init builder (C6): a seed α-blended k-NN graph.
//!
//! For each id, draws `S` candidate ids via the monotonize-then-rotate
//! scheme (§4.5) — O(S log S), no rejection sampling — scores them under
//! the build-time α, and emits the adjacency sorted ascending by blended
//! distance. One row is fully independent of every other, so construction
//! is `rayon`-parallel over ids with a dynamic chunk size, matching the
//! scheduling model in §5.

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use rayon::prelude::*;

use crate::config::RandomInitConfig;
use crate::dataset::Dataset;
use crate::distance::{blend, DistanceKind};
use crate::index::node::NodeStore;

/// Default chunk size for the dynamic-chunk row scheduler (§5).
const CHUNK_SIZE: usize = 128;

/// Draws `size` ids in `[0, n)` via monotonize-then-rotate: sample `size`
/// raw values uniformly in `[0, n - size)`, sort, monotonize to force
/// strict increase (deduplicating without rejection), then rotate by a
/// random offset mod `n`. Produces `size` distinct ids; duplicates of the
/// row's own id are possible and are filtered by the caller, mirroring the
/// source material's `if id == i { continue }` behavior.
fn gen_random_ids(rng: &mut SmallRng, n: usize, size: usize) -> Vec<usize> {
    if size == 0 || n <= size {
        return Vec::new();
    }
    let mut addr: Vec<usize> = (0..size).map(|_| rng.gen_range(0..n - size)).collect();
    addr.sort_unstable();
    for i in 1..size {
        if addr[i] <= addr[i - 1] {
            addr[i] = addr[i - 1] + 1;
        }
    }
    let off = rng.gen_range(0..n);
    for a in &mut addr {
        *a = (*a + off) % n;
    }
    addr
}

/// Builds the random-init seed graph over `dataset` into a fresh
/// layer-0-only [`NodeStore`].
#[must_use]
#[tracing::instrument(skip(dataset, config), fields(n = dataset.len(), s = config.s))]
pub fn build(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: &RandomInitConfig,
) -> NodeStore {
    let n = dataset.len();
    let store = NodeStore::new(n);
    for id in 0..n {
        store.register(id, 0);
    }

    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let alpha = config.alpha_build;
    let s = config.s;
    let seed = config.seed;

    (0..n)
        .into_par_iter()
        .with_min_len(CHUNK_SIZE)
        .for_each(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            let picks = gen_random_ids(&mut rng, n, s);

            let mut scored: Vec<(usize, f32)> = picks
                .into_iter()
                .filter(|&id| id != i)
                .map(|id| {
                    let e = e_kind.distance(dataset.embedding(i), dataset.embedding(id), d_e);
                    let sp = s_kind.distance(dataset.location(i), dataset.location(id), d_s);
                    (id, blend(alpha, e, sp))
                })
                .collect();
            scored.sort_by(|a, b| a.1.total_cmp(&b.1));

            store.set_neighbors(i, 0, scored.into_iter().map(|(id, _)| id).collect());
        });

    tracing::debug!(n, "random init build complete");
    store
}

#[cfg(test)]
mod random_init_tests;
