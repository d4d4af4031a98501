//! Recall validation against brute-force ground truth (Scenario F, §8).
//!
//! Builds a small Gaussian-blob dataset, computes brute-force top-K under
//! the blended distance, and checks that HNSW and GeoGraph routing both
//! clear the recall floor the scenario specifies.
//!
//! ```bash
//! cargo test --test recall_validation
//! ```

use std::collections::HashSet;

use geograph_core::config::{GeoGraphConfig, HnswConfig};
use geograph_core::{BuilderKind, Dataset, DistanceKind, GeoGraphIndexConfig, Index, NodeId};

/// Minimal linear congruential generator, seeded and deterministic, so the
/// test needs no external RNG dependency for shaping a Gaussian blob.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        self.0
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Box-Muller transform, one standard normal sample per call.
    fn next_gaussian(&mut self) -> f32 {
        let u1 = self.next_f32().max(1e-6);
        let u2 = self.next_f32();
        (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
    }
}

fn gaussian_blob(n: usize, dim: usize, seed: u64) -> Vec<f32> {
    let mut rng = Lcg(seed);
    (0..n * dim).map(|_| rng.next_gaussian()).collect()
}

fn brute_force_topk(
    dataset: &Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    query_emb: &[f32],
    query_loc: &[f32],
    alpha: f32,
    k: usize,
) -> Vec<NodeId> {
    let d_e = dataset.embedding_dim();
    let d_s = dataset.location_dim();
    let mut scored: Vec<(NodeId, f32)> = (0..dataset.len())
        .map(|id| {
            let e = e_kind.distance(query_emb, dataset.embedding(id), d_e);
            let s = s_kind.distance(query_loc, dataset.location(id), d_s);
            (id, geograph_core::distance::blend(alpha, e, s))
        })
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.into_iter().take(k).map(|(id, _)| id).collect()
}

fn recall_at_k(retrieved: &[NodeId], ground_truth: &[NodeId]) -> f64 {
    if ground_truth.is_empty() {
        return 0.0;
    }
    let retrieved_set: HashSet<_> = retrieved.iter().collect();
    let hits = ground_truth.iter().filter(|id| retrieved_set.contains(id)).count();
    hits as f64 / ground_truth.len() as f64
}

fn blob_dataset(n: usize, d_e: usize, d_s: usize) -> Dataset {
    let embeddings = gaussian_blob(n, d_e, 1);
    let locations = gaussian_blob(n, d_s, 2);
    Dataset::new(embeddings, locations, n, d_e, d_s).unwrap()
}

#[test]
fn hnsw_recall_clears_floor() {
    let _ = tracing_subscriber::fmt::try_init();
    let n = 2000;
    let d_e = 16;
    let d_s = 2;
    let dataset = blob_dataset(n, d_e, d_s);
    let k = 10;
    let alpha = 0.5;

    let mut config = GeoGraphIndexConfig::default();
    config.hnsw = HnswConfig { ef_construction: 200, max_m: 16, max_m0: 32, ..config.hnsw };
    config.search.l_search = 100;
    config.search.k_search = k;

    let index = Index::build(
        dataset.clone(),
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        config,
        BuilderKind::Hnsw,
    )
    .unwrap();

    let queries = 30;
    let mut total_recall = 0.0;
    for qi in 0..queries {
        let query_emb = gaussian_blob(1, d_e, 1000 + qi as u64);
        let query_loc = gaussian_blob(1, d_s, 2000 + qi as u64);
        let ground_truth = brute_force_topk(
            &dataset,
            DistanceKind::SquaredL2,
            DistanceKind::SquaredL2,
            &query_emb,
            &query_loc,
            alpha,
            k,
        );
        let retrieved: Vec<NodeId> = index
            .search(&query_emb, &query_loc, alpha)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        total_recall += recall_at_k(&retrieved, &ground_truth);
    }

    let avg_recall = total_recall / f64::from(queries);
    assert!(
        avg_recall >= 0.9,
        "HNSW recall@{k} averaged {avg_recall:.3} across {queries} queries, expected >= 0.9"
    );
}

#[test]
fn geograph_recall_clears_floor_across_alpha() {
    let n = 1500;
    let d_e = 12;
    let d_s = 2;
    let dataset = blob_dataset(n, d_e, d_s);
    let k = 10;

    let mut config = GeoGraphIndexConfig::default();
    config.geograph = GeoGraphConfig { max_m: 20, ef_construction: 150, ..config.geograph };
    config.search.l_search = 100;
    config.search.k_search = k;

    let index = Index::build(
        dataset.clone(),
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        config,
        BuilderKind::GeoGraph,
    )
    .unwrap();

    for &alpha in &[0.0_f32, 0.5, 1.0] {
        let queries = 15;
        let mut total_recall = 0.0;
        for qi in 0..queries {
            let query_emb = gaussian_blob(1, d_e, 3000 + qi as u64);
            let query_loc = gaussian_blob(1, d_s, 4000 + qi as u64);
            let ground_truth = brute_force_topk(
                &dataset,
                DistanceKind::SquaredL2,
                DistanceKind::SquaredL2,
                &query_emb,
                &query_loc,
                alpha,
                k,
            );
            let retrieved: Vec<NodeId> = index
                .search(&query_emb, &query_loc, alpha)
                .unwrap()
                .into_iter()
                .map(|(id, _)| id)
                .collect();
            total_recall += recall_at_k(&retrieved, &ground_truth);
        }
        let avg_recall = total_recall / f64::from(queries);
        assert!(
            avg_recall >= 0.7,
            "GeoGraph recall@{k} at alpha={alpha} averaged {avg_recall:.3}, expected >= 0.7"
        );
    }
}

#[test]
fn recall_helper_reports_perfect_match() {
    let retrieved = vec![1, 2, 3, 4, 5];
    let ground_truth = vec![1, 2, 3, 4, 5];
    assert!((recall_at_k(&retrieved, &ground_truth) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn recall_helper_reports_partial_match() {
    let retrieved = vec![1, 2, 3, 4, 5];
    let ground_truth = vec![1, 2, 6, 7, 8];
    assert!((recall_at_k(&retrieved, &ground_truth) - 0.4).abs() < f64::EPSILON);
}
