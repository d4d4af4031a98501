use super::*;
use rand::SeedableRng;

#[test]
fn gen_random_ids_are_distinct_and_in_range() {
    let mut rng = SmallRng::seed_from_u64(42);
    let ids = gen_random_ids(&mut rng, 20, 5);
    assert_eq!(ids.len(), 5);
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 5);
    assert!(ids.iter().all(|&id| id < 20));
}

#[test]
fn gen_random_ids_empty_when_size_exceeds_n() {
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(gen_random_ids(&mut rng, 3, 5).is_empty());
}

#[test]
fn build_produces_sorted_adjacency_scenario_a() {
    // Scenario A from the spec: N=8 grid points, S=3, alpha=0.5, Loc=Emb.
    let coords: Vec<(f32, f32)> = vec![
        (0.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (3.0, 0.0),
        (0.0, 1.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 1.0),
    ];
    let flat: Vec<f32> = coords.iter().flat_map(|&(x, y)| [x, y]).collect();
    let dataset = Dataset::new(flat.clone(), flat, 8, 2, 2).unwrap();

    let config = RandomInitConfig {
        s: 3,
        alpha_build: 0.5,
        seed: 42,
        n_threads: 1,
    };
    let store = build(&dataset, DistanceKind::SquaredL2, DistanceKind::SquaredL2, &config);

    for id in 0..8 {
        let neighbors = store.neighbors(id, 0);
        assert!(neighbors.len() <= 3);
        assert!(!neighbors.contains(&id));
        // sorted ascending by blended distance
        let dists: Vec<f32> = neighbors
            .iter()
            .map(|&n| {
                let e = DistanceKind::SquaredL2.distance(dataset.embedding(id), dataset.embedding(n), 2);
                let s = DistanceKind::SquaredL2.distance(dataset.location(id), dataset.location(n), 2);
                blend(0.5, e, s)
            })
            .collect();
        for w in dists.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }
}
