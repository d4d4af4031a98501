use super::*;

#[test]
fn solve_le_zero_coeff_positive_rhs_is_full() {
    assert_eq!(solve_le(0.0, 1.0).intervals(), &[(0.0, 1.0)]);
}

#[test]
fn solve_le_zero_coeff_negative_rhs_is_empty() {
    assert!(solve_le(0.0, -1.0).is_empty());
}

#[test]
fn solve_le_positive_coeff_gives_lower_range() {
    let r = solve_le(2.0, 1.0);
    assert_eq!(r.intervals(), &[(0.0, 0.5)]);
}

#[test]
fn solve_le_negative_coeff_gives_upper_range() {
    let r = solve_le(-2.0, -1.0);
    assert_eq!(r.intervals(), &[(0.5, 1.0)]);
}

#[test]
fn dominated_candidate_is_pruned_for_all_alpha() {
    // x = (1,1) strictly dominates c = (2,2); coincident edge x-c.
    let r = pruned_by(1.0, 1.0, 0.0, 0.0, 2.0, 2.0);
    assert_eq!(r.intervals(), &[(0.0, 1.0)]);
}

#[test]
fn partial_pruning_yields_half_range() {
    let r = pruned_by(0.0, 10.0, 5.0, 5.0, 10.0, 0.0);
    assert_eq!(r.intervals().len(), 1);
    let (lo, hi) = r.intervals()[0];
    assert!((lo - 0.5).abs() < 1e-4);
    assert!((hi - 1.0).abs() < 1e-4);
}

#[test]
fn scenario_e_prune_diversity() {
    // q at origin; candidates at (1,0), (1.01,0), (0,1); range=2.
    let pool = vec![
        SkylinePoint { id: 0, e: 1.0, s: 0.0 },
        SkylinePoint { id: 1, e: 1.01, s: 0.0 },
        SkylinePoint { id: 2, e: 0.0, s: 1.0 },
    ];
    let accepted = geo2neighbor(pool, 2, 0.5, |_, _| (0.0, 0.0));
    let ids: Vec<_> = accepted.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![2, 0]);
}

#[test]
fn accept_threshold_rejects_near_coincident_candidate() {
    // c is almost coincident with x (in both E and S), so x prunes its
    // entire usability range; the second candidate must be rejected even
    // though max_m=2 would otherwise admit it.
    let pool = vec![
        SkylinePoint { id: 0, e: 1.0, s: 1.0 },
        SkylinePoint { id: 1, e: 1.0001, s: 1.0001 },
    ];
    let accepted = geo2neighbor(pool, 2, 0.5, |_, _| (0.0, 0.0));
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].id, 0);
}
