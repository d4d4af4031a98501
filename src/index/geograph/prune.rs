//! `Geo2Neighbor`: the GeoGraph prune heuristic (§4.8).
//!
//! Walks the candidate pool skyline-layer by skyline-layer (closest `E`
//! first within a layer), and for each candidate derives the α-range on
//! which it is *not* dominated by any already-accepted neighbor. A
//! candidate is kept, with that range as its edge usability, only if the
//! remaining measure clears `accept_threshold`.

use crate::index::geograph::interval::IntervalSet;
use crate::index::node::NodeId;
use crate::index::skyline::{SkylinePoint, SkylineQueue};

const EPS: f32 = 1e-6;

/// Solves `alpha * a <= b` for `alpha in [0,1]`, returning the admissible
/// range in canonical form. `a == 0` degenerates to "always" or "never"
/// depending on the sign of `b`.
fn solve_le(a: f32, b: f32) -> IntervalSet {
    if a.abs() < EPS {
        if b >= -EPS {
            IntervalSet::full()
        } else {
            IntervalSet::empty()
        }
    } else if a > 0.0 {
        let u = b / a;
        if u < 0.0 {
            IntervalSet::empty()
        } else if u >= 1.0 {
            IntervalSet::full()
        } else {
            IntervalSet::single(0.0, u)
        }
    } else {
        let l = b / a;
        if l > 1.0 {
            IntervalSet::empty()
        } else if l <= 0.0 {
            IntervalSet::full()
        } else {
            IntervalSet::single(l, 1.0)
        }
    }
}

/// The α-range on which already-picked neighbor `x` dominates candidate
/// `c` for routing from `q` (§4.8 step 3): the intersection of the two
/// closed-form inequalities derived from the `(E,S)` pairs of `q-x`,
/// `x-c`, and `q-c`.
#[must_use]
pub fn pruned_by(e_qx: f32, s_qx: f32, e_xc: f32, s_xc: f32, e_qc: f32, s_qc: f32) -> IntervalSet {
    let ineq1 = solve_le(e_qx - s_qx - e_qc + s_qc, s_qc - s_qx);
    let ineq2 = solve_le(e_xc - s_xc - e_qc + s_qc, s_qc - s_xc);
    ineq1.intersect(&ineq2)
}

/// A neighbor accepted by `Geo2Neighbor`, with its final α-usability.
#[derive(Debug, Clone)]
pub struct PrunedNeighbor {
    pub id: NodeId,
    pub e: f32,
    pub s: f32,
    pub usability: IntervalSet,
}

/// Runs `Geo2Neighbor` over `pool` (candidates' `(E,S)` relative to `q`),
/// accepting up to `max_m` neighbors. `edge_es(x, c)` supplies `(E_xc,
/// S_xc)` for an already-accepted neighbor `x` and a candidate `c`.
#[must_use]
pub fn geo2neighbor(
    pool: Vec<SkylinePoint>,
    max_m: usize,
    accept_threshold: f32,
    edge_es: impl Fn(NodeId, NodeId) -> (f32, f32),
) -> Vec<PrunedNeighbor> {
    let mut queue = SkylineQueue::new(pool);
    let mut accepted: Vec<PrunedNeighbor> = Vec::with_capacity(max_m);

    while accepted.len() < max_m {
        let Some(layer) = queue.next_layer() else {
            break;
        };
        for cand in layer {
            if accepted.len() >= max_m {
                break;
            }
            let pruned_ranges: Vec<IntervalSet> = accepted
                .iter()
                .map(|x| {
                    let (e_xc, s_xc) = edge_es(x.id, cand.id);
                    pruned_by(x.e, x.s, e_xc, s_xc, cand.e, cand.s)
                })
                .collect();
            let blocked = IntervalSet::union_all(pruned_ranges.iter());
            let usability = IntervalSet::full().subtract(&blocked);
            if usability.measure() >= accept_threshold {
                accepted.push(PrunedNeighbor {
                    id: cand.id,
                    e: cand.e,
                    s: cand.s,
                    usability,
                });
            }
        }
    }

    accepted
}

#[cfg(test)]
mod prune_tests;
