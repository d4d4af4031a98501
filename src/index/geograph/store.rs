//! GeoGraph node store: per-id adjacency where each out-edge carries its
//! cached `(E, S)` pair plus an α-usability [`IntervalSet`], instead of the
//! plain ids [`crate::index::node::NodeStore`] holds.
//!
//! Same arena shape as the flat node store (§9): ids index directly into a
//! `Vec`, edges are records not references, one `RwLock` guard per node.

use parking_lot::RwLock;

use crate::index::geograph::interval::IntervalSet;
use crate::index::node::NodeId;

/// One α-annotated directed out-edge.
#[derive(Debug, Clone)]
pub struct GeoEdge {
    pub id: NodeId,
    pub e: f32,
    pub s: f32,
    pub usability: IntervalSet,
}

/// Per-id adjacency for the GeoGraph builder/router, single layer (§4.8's
/// default incremental-insert mode operates on one layer; see the "forced
/// level 0" open question in §9).
#[derive(Debug)]
pub struct GeoNodeStore {
    edges: Vec<RwLock<Vec<GeoEdge>>>,
    entry_point: RwLock<Option<NodeId>>,
}

impl GeoNodeStore {
    /// Creates a store pre-sized to `capacity` ids, all with empty
    /// adjacency.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            edges: (0..capacity).map(|_| RwLock::new(Vec::new())).collect(),
            entry_point: RwLock::new(None),
        }
    }

    /// Number of ids this store covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if the store covers no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The entry point used to seed routing, if one has been registered.
    #[must_use]
    pub fn entry_point(&self) -> Option<NodeId> {
        *self.entry_point.read()
    }

    /// Registers `node_id` as the entry point if none exists yet.
    pub fn ensure_entry_point(&self, node_id: NodeId) {
        let mut entry = self.entry_point.write();
        if entry.is_none() {
            *entry = Some(node_id);
        }
    }

    /// Snapshot of `node_id`'s out-edges.
    #[must_use]
    pub fn edges(&self, node_id: NodeId) -> Vec<GeoEdge> {
        self.edges
            .get(node_id)
            .map(|slot| slot.read().clone())
            .unwrap_or_default()
    }

    /// Replaces `node_id`'s out-edges wholesale (used after re-pruning).
    pub fn set_edges(&self, node_id: NodeId, edges: Vec<GeoEdge>) {
        if let Some(slot) = self.edges.get(node_id) {
            *slot.write() = edges;
        }
    }

    /// Inserts or replaces the edge `from -> to` into the *shared*
    /// adjacency under `from`'s own lock.
    ///
    /// This is the faithful-port correction noted in §9: the source
    /// material's `InterInsert` pushed into a local copy of the
    /// destination's pool, which never reached the real graph. Here the
    /// write lands on `self.edges[from]` directly, so the reciprocal edge
    /// is actually visible to later readers and prunes.
    pub fn upsert_edge(&self, from: NodeId, edge: GeoEdge) -> bool {
        let Some(slot) = self.edges.get(from) else {
            return false;
        };
        let mut list = slot.write();
        if list.iter().any(|e| e.id == edge.id) {
            return false;
        }
        list.push(edge);
        true
    }
}

#[cfg(test)]
mod store_tests;
