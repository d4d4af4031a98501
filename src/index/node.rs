//! Node store (C4): contiguous per-id adjacency, one entry per layer, each
//! protected by its own access guard.
//!
//! Shared by the random-init, NSW/NSW-V2 and HNSW builders. GeoGraph needs
//! richer per-edge metadata and keeps its own store (see
//! [`crate::index::geograph::store`]) built on the same id-indexed,
//! arena-style layout described in §9: neighbors are plain id records, never
//! owning references, so there are no reference cycles to manage.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Id of a node in the graph; a plain index into the node store's arena.
pub type NodeId = usize;

/// One layer's adjacency lists, one per-node guard.
#[derive(Debug)]
struct Layer {
    neighbors: Vec<RwLock<Vec<NodeId>>>,
}

impl Layer {
    fn new(capacity: usize) -> Self {
        Self {
            neighbors: (0..capacity).map(|_| RwLock::new(Vec::new())).collect(),
        }
    }

    fn ensure_capacity(&mut self, node_id: NodeId) {
        while self.neighbors.len() <= node_id {
            self.neighbors.push(RwLock::new(Vec::new()));
        }
    }

    fn get(&self, node_id: NodeId) -> Vec<NodeId> {
        self.neighbors
            .get(node_id)
            .map(|n| n.read().clone())
            .unwrap_or_default()
    }

    fn set(&self, node_id: NodeId, neighbors: Vec<NodeId>) {
        if let Some(slot) = self.neighbors.get(node_id) {
            *slot.write() = neighbors;
        }
    }

    /// Appends `neighbor` to `node_id`'s list. With `dedup = true`, rejects
    /// the push (returns `false`) if `neighbor` is already present or equals
    /// `node_id` itself. Returns the resulting list length.
    fn add_friend(&self, node_id: NodeId, neighbor: NodeId, dedup: bool) -> (bool, usize) {
        let Some(slot) = self.neighbors.get(node_id) else {
            return (false, 0);
        };
        let mut list = slot.write();
        if neighbor == node_id {
            return (false, list.len());
        }
        if dedup && list.contains(&neighbor) {
            return (false, list.len());
        }
        list.push(neighbor);
        (true, list.len())
    }
}

/// Per-id adjacency across all layers, plus the entry point and max level
/// bookkeeping shared by the hierarchical builders.
///
/// Flat builders (random-init, NSW, NSW-V2) only ever use layer 0.
#[derive(Debug)]
pub struct NodeStore {
    layers: RwLock<Vec<Layer>>,
    levels: RwLock<Vec<usize>>,
    entry_point: RwLock<Option<NodeId>>,
    max_level: AtomicUsize,
    count: AtomicUsize,
}

impl NodeStore {
    /// Creates a store with one (layer-0) layer pre-sized to `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            layers: RwLock::new(vec![Layer::new(capacity)]),
            levels: RwLock::new(vec![0; capacity]),
            entry_point: RwLock::new(None),
            max_level: AtomicUsize::new(0),
            count: AtomicUsize::new(0),
        }
    }

    /// Number of nodes registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// True if no node has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current highest level any node occupies.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.max_level.load(Ordering::Relaxed)
    }

    /// Current entry point, if any node has been registered.
    #[must_use]
    pub fn entry_point(&self) -> Option<NodeId> {
        *self.entry_point.read()
    }

    /// The level at which `node_id` lives (its highest occupied layer).
    #[must_use]
    pub fn level_of(&self, node_id: NodeId) -> usize {
        self.levels.read().get(node_id).copied().unwrap_or(0)
    }

    /// Registers `node_id` at `level`, growing layers up to `level` and
    /// promoting the entry point if this is the first node or the new
    /// highest level. Safe to call exactly once per node, in any order
    /// relative to other nodes' registration (guarded internally).
    pub fn register(&self, node_id: NodeId, level: usize) {
        {
            let mut layers = self.layers.write();
            while layers.len() <= level {
                let cap = self.levels.read().len();
                layers.push(Layer::new(cap));
            }
            for layer in layers.iter_mut() {
                layer.ensure_capacity(node_id);
            }
        }
        {
            let mut levels = self.levels.write();
            while levels.len() <= node_id {
                levels.push(0);
            }
            levels[node_id] = level;
        }

        let mut entry = self.entry_point.write();
        if entry.is_none() {
            *entry = Some(node_id);
            self.max_level.store(level, Ordering::Relaxed);
        } else if level > self.max_level.load(Ordering::Relaxed) {
            self.max_level.store(level, Ordering::Relaxed);
            *entry = Some(node_id);
        }
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of `node_id`'s neighbors at `layer`.
    #[must_use]
    pub fn neighbors(&self, node_id: NodeId, layer: usize) -> Vec<NodeId> {
        self.layers
            .read()
            .get(layer)
            .map(|l| l.get(node_id))
            .unwrap_or_default()
    }

    /// Replaces `node_id`'s neighbor list at `layer` wholesale (used after
    /// heuristic pruning selects survivors).
    pub fn set_neighbors(&self, node_id: NodeId, layer: usize, neighbors: Vec<NodeId>) {
        if let Some(l) = self.layers.read().get(layer) {
            l.set(node_id, neighbors);
        }
    }

    /// Appends `neighbor` to `node_id`'s adjacency at `layer`.
    ///
    /// With `dedup = true`, a pre-existing edge (or a self-edge) is
    /// rejected silently rather than erroring, matching §4.4's `AddFriend`
    /// contract. Returns `true` if the edge was actually added.
    pub fn add_friend(&self, node_id: NodeId, layer: usize, neighbor: NodeId, dedup: bool) -> bool {
        self.layers
            .read()
            .get(layer)
            .map(|l| l.add_friend(node_id, neighbor, dedup).0)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod node_tests;
