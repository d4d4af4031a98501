use super::*;

fn grid_dataset(n: usize) -> Dataset {
    let mut flat = Vec::with_capacity(n * 2);
    for i in 0..n {
        flat.push((i % 50) as f32);
        flat.push((i / 50) as f32);
    }
    Dataset::new(flat.clone(), flat, n, 2, 2).unwrap()
}

#[test]
fn scenario_c_level_distribution_bounded() {
    let config = HnswConfig {
        mult: -1.0,
        max_m: 16,
        ..Default::default()
    };
    let level_mult = config.level_mult();
    let mut rng = SmallRng::seed_from_u64(42);
    let mut max_level = 0;
    for _ in 0..1000 {
        let level = random_level(&mut rng, level_mult);
        max_level = max_level.max(level);
    }
    assert!(max_level <= 32);
}

#[test]
fn heuristic_prune_keeps_diverse_neighbors() {
    // q at origin; candidates at (1,0), (1.01,0), (0,1) -- mirrors scenario E.
    let positions = [(1.0_f32, 0.0_f32), (1.01, 0.0), (0.0, 1.0)];
    let candidates: Vec<(NodeId, f32)> = positions
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| (id, (x * x + y * y).sqrt()))
        .collect();
    let dist_between = |a: NodeId, b: NodeId| {
        let (ax, ay) = positions[a];
        let (bx, by) = positions[b];
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    };
    let selected = select_neighbors_heuristic(&candidates, 2, dist_between);
    assert_eq!(selected, vec![0, 2]);
}

#[test]
fn build_respects_degree_caps_and_no_self_loops() {
    let dataset = grid_dataset(60);
    let config = HnswConfig {
        max_m: 4,
        max_m0: 8,
        mult: -1.0,
        ef_construction: 20,
        alpha_build: 0.5,
        seed: 7,
        n_threads: 1,
    };
    let store = build(&dataset, DistanceKind::SquaredL2, DistanceKind::SquaredL2, &config);

    for id in 0..60 {
        for layer in 0..=store.max_level() {
            let neighbors = store.neighbors(id, layer);
            assert!(!neighbors.contains(&id));
            let mut sorted = neighbors.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), neighbors.len());
            let cap = if layer == 0 { config.max_m0 } else { config.max_m };
            assert!(neighbors.len() <= cap);
        }
    }
}

#[test]
fn entry_point_level_equals_max_level() {
    let dataset = grid_dataset(40);
    let config = HnswConfig {
        seed: 3,
        ..Default::default()
    };
    let store = build(&dataset, DistanceKind::SquaredL2, DistanceKind::SquaredL2, &config);
    let ep = store.entry_point().unwrap();
    assert_eq!(store.level_of(ep), store.max_level());
}

#[test]
fn search_returns_k_results() {
    let dataset = grid_dataset(200);
    let config = HnswConfig {
        seed: 11,
        ..Default::default()
    };
    let store = build(&dataset, DistanceKind::SquaredL2, DistanceKind::SquaredL2, &config);
    let query = dataset.embedding(5).to_vec();
    let results = search(
        &store,
        &dataset,
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        &query,
        &query,
        0.5,
        50,
        10,
    );
    assert_eq!(results.len(), 10);
}
