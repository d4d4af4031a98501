use super::*;
use crate::index::geograph::interval::IntervalSet;
use crate::index::geograph::store::GeoEdge;

fn line_dataset() -> Dataset {
    Dataset::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0], 4, 1, 1).unwrap()
}

#[test]
fn search_on_empty_store_returns_empty() {
    let dataset = line_dataset();
    let store = GeoNodeStore::new(4);
    let results = search(
        &store,
        &dataset,
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        &[0.0],
        &[0.0],
        0.5,
        10,
        3,
    );
    assert!(results.is_empty());
}

#[test]
fn search_follows_edges_within_usability_and_finds_target() {
    let dataset = line_dataset();
    let store = GeoNodeStore::new(4);
    store.ensure_entry_point(0);
    store.upsert_edge(0, GeoEdge { id: 1, e: 1.0, s: 1.0, usability: IntervalSet::full() });
    store.upsert_edge(1, GeoEdge { id: 2, e: 1.0, s: 1.0, usability: IntervalSet::full() });
    store.upsert_edge(2, GeoEdge { id: 3, e: 1.0, s: 1.0, usability: IntervalSet::full() });

    let results = search(
        &store,
        &dataset,
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        &[3.0],
        &[3.0],
        0.5,
        10,
        1,
    );
    assert_eq!(results.first().map(|(id, _)| *id), Some(3));
}

#[test]
fn search_skips_edges_outside_usability_range() {
    let dataset = line_dataset();
    let store = GeoNodeStore::new(4);
    store.ensure_entry_point(0);
    // edge to 1 only usable for alpha in [0.0, 0.2); querying at alpha=0.9
    // must not cross it, so node 1 (and anything only reachable through
    // it) stays unreachable.
    store.upsert_edge(0, GeoEdge { id: 1, e: 1.0, s: 1.0, usability: IntervalSet::single(0.0, 0.2) });
    store.upsert_edge(1, GeoEdge { id: 2, e: 1.0, s: 1.0, usability: IntervalSet::full() });

    let results = search(
        &store,
        &dataset,
        DistanceKind::SquaredL2,
        DistanceKind::SquaredL2,
        &[2.0],
        &[2.0],
        0.9,
        10,
        3,
    );
    assert!(results.iter().all(|(id, _)| *id == 0));
}
