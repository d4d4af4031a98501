//! Greedy router (C10, §4.9): the generic pool-based search used when the
//! caller has already seeded an entry pool — no layer structure, no
//! per-node locking assumptions, just a `neighbors` lookup and a `dist`
//! scorer. NSW, HNSW and GeoGraph all route through more specialized
//! searches (beam.rs, hnsw::search, geograph::router::search); this one
//! exists for callers that only have a flat adjacency function, e.g. an
//! entry strategy that seeds from outside the graph itself.
//!
//! Candidates are kept in a single sorted pool capped at `l_search`, each
//! tagged with whether it still needs expanding. The scan resumes from
//! the smallest unexpanded index after every insertion, so a closer
//! candidate discovered late gets re-examined before the search moves on.

use crate::index::node::NodeId;

#[derive(Clone, Copy)]
struct PoolEntry {
    id: NodeId,
    distance: f32,
    unexpanded: bool,
}

fn insert_sorted(pool: &mut Vec<PoolEntry>, entry: PoolEntry, cap: usize) -> usize {
    let pos = pool.partition_point(|e| e.distance <= entry.distance);
    pool.insert(pos, entry);
    if pool.len() > cap {
        pool.truncate(cap);
    }
    pos
}

/// Runs the greedy pool search from `entry_points`, expanding via
/// `neighbors` and scoring via `dist`, returning up to `k_search` ids
/// closer-first. `capacity` sizes the internal seen-flag array and must
/// be at least as large as the largest id ever passed to `neighbors` or
/// `entry_points`.
#[must_use]
pub fn search(
    neighbors: impl Fn(NodeId) -> Vec<NodeId>,
    dist: impl Fn(NodeId) -> f32,
    entry_points: &[NodeId],
    capacity: usize,
    l_search: usize,
    k_search: usize,
) -> Vec<NodeId> {
    let l_search = l_search.max(1);
    let mut pool: Vec<PoolEntry> = Vec::with_capacity(l_search);
    let mut seen = vec![false; capacity];

    for &ep in entry_points {
        if ep >= capacity || seen[ep] {
            continue;
        }
        seen[ep] = true;
        let d = dist(ep);
        insert_sorted(
            &mut pool,
            PoolEntry { id: ep, distance: d, unexpanded: true },
            l_search,
        );
    }

    let mut k = 0usize;
    while k < pool.len() {
        if !pool[k].unexpanded {
            k += 1;
            continue;
        }
        pool[k].unexpanded = false;
        let cur = pool[k].id;
        let worst = if pool.len() >= l_search {
            pool[pool.len() - 1].distance
        } else {
            f32::INFINITY
        };

        let mut min_r: Option<usize> = None;
        for nb in neighbors(cur) {
            if nb >= capacity || seen[nb] {
                continue;
            }
            seen[nb] = true;
            let d = dist(nb);
            if pool.len() < l_search || d < worst {
                let r = insert_sorted(
                    &mut pool,
                    PoolEntry { id: nb, distance: d, unexpanded: true },
                    l_search,
                );
                if r <= k {
                    min_r = Some(min_r.map_or(r, |m| m.min(r)));
                }
            }
        }

        k = min_r.unwrap_or(k + 1);
    }

    pool.into_iter().take(k_search).map(|e| e.id).collect()
}

#[cfg(test)]
mod greedy_tests;
