//! # `GeoGraph` Core
//!
//! Graph-based approximate nearest-neighbor index over points that carry
//! both a high-dimensional embedding and a low-dimensional geographic
//! coordinate, searched under a query-time blend
//!
//! ```text
//! d(p, q; α) = α·E(p, q) + (1 − α)·S(p, q)
//! ```
//!
//! `α` is supplied per query, not baked in at build time, so every graph
//! variant here must stay navigable across the whole `[0, 1]` range.
//!
//! ## Builders
//!
//! - **Random init** — a seed k-NN graph, cheap and parallel to build.
//! - **NSW / NSW-V2** — flat greedy-insertion graphs; V2 sweeps a fixed set
//!   of build-time α probes instead of committing to one.
//! - **HNSW** — hierarchical descent with the RNG-style neighbor heuristic.
//! - **GeoGraph** — the distinguishing builder: every edge carries an
//!   α-usability interval set, pruned by `Geo2Neighbor`'s skyline walk, so
//!   a single graph serves every α without rebuilding.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use geograph_core::{BuilderKind, DistanceKind, GeoGraphIndexConfig, Index, Dataset};
//!
//! let dataset = Dataset::new(embeddings, locations, n, d_e, d_s)?;
//! let config = GeoGraphIndexConfig::load()?;
//! let index = Index::build(
//!     dataset,
//!     DistanceKind::SquaredL2,
//!     DistanceKind::Haversine,
//!     config,
//!     BuilderKind::GeoGraph,
//! )?;
//!
//! let results = index.search(&query_emb, &query_loc, 0.5)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod index;
pub mod persist;
pub mod sync;
pub mod util;

pub use config::GeoGraphIndexConfig;
pub use dataset::Dataset;
pub use distance::DistanceKind;
pub use error::{Error, Result};
pub use index::NodeId;

use index::geograph::GeoNodeStore;
use index::node::NodeStore;

/// Which builder populates the graph a fresh [`Index`] is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderKind {
    /// Random k-NN seed graph (C6).
    RandomInit,
    /// Flat NSW, single build-time α (C7).
    Nsw,
    /// Flat NSW-V2, sweeps a fixed α probe set (C7).
    NswV2,
    /// Hierarchical HNSW (C8).
    Hnsw,
    /// GeoGraph with α-interval edges (C9).
    GeoGraph,
}

/// The graph a builder produced, tagged by which variant built it so
/// `Index::search` can route to the matching search path.
enum BuiltGraph {
    RandomInit(NodeStore),
    Nsw(NodeStore),
    NswV2(NodeStore),
    Hnsw(NodeStore),
    GeoGraph(GeoNodeStore),
}

/// A built ANN index over a fixed [`Dataset`], ready to serve `(E, S, α)`
/// queries.
///
/// Immutable after construction: nodes and edges are never mutated past
/// `build`, matching §3's lifecycle invariant. Building a second index
/// (a different variant, or a refreshed dataset) means constructing a new
/// `Index`.
pub struct Index {
    dataset: Dataset,
    e_kind: DistanceKind,
    s_kind: DistanceKind,
    config: GeoGraphIndexConfig,
    graph: BuiltGraph,
}

impl Index {
    /// Builds an index of the requested `kind` over `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if `dataset` has zero points, or
    /// whatever [`GeoGraphIndexConfig::validate`] rejects.
    pub fn build(
        dataset: Dataset,
        e_kind: DistanceKind,
        s_kind: DistanceKind,
        config: GeoGraphIndexConfig,
        kind: BuilderKind,
    ) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        config.validate()?;

        let graph = match kind {
            BuilderKind::RandomInit => BuiltGraph::RandomInit(index::random_init::build(
                &dataset,
                e_kind,
                s_kind,
                &config.random_init,
            )),
            BuilderKind::Nsw => {
                BuiltGraph::Nsw(index::nsw::build(&dataset, e_kind, s_kind, &config.nsw))
            }
            BuilderKind::NswV2 => {
                BuiltGraph::NswV2(index::nsw::build_v2(&dataset, e_kind, s_kind, &config.nsw))
            }
            BuilderKind::Hnsw => {
                BuiltGraph::Hnsw(index::hnsw::build(&dataset, e_kind, s_kind, &config.hnsw))
            }
            BuilderKind::GeoGraph => BuiltGraph::GeoGraph(index::geograph::build(
                &dataset,
                e_kind,
                s_kind,
                &config.geograph,
            )),
        };

        Ok(Self { dataset, e_kind, s_kind, config, graph })
    }

    /// Returns the top-K ids closest to `(query_emb, query_loc)` under the
    /// blend at `alpha_query`, closer-first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the query's dimensions don't
    /// match the dataset this index was built from.
    pub fn search(
        &self,
        query_emb: &[f32],
        query_loc: &[f32],
        alpha_query: f32,
    ) -> Result<Vec<(NodeId, f32)>> {
        self.dataset.validate_query(query_emb, query_loc)?;
        let s = &self.config.search;

        let results = match &self.graph {
            BuiltGraph::RandomInit(store) | BuiltGraph::Nsw(store) | BuiltGraph::NswV2(store) => {
                index::nsw::search(
                    store,
                    &self.dataset,
                    self.e_kind,
                    self.s_kind,
                    query_emb,
                    query_loc,
                    alpha_query,
                    s.l_search,
                    s.k_search,
                )
            }
            BuiltGraph::Hnsw(store) => index::hnsw::search(
                store,
                &self.dataset,
                self.e_kind,
                self.s_kind,
                query_emb,
                query_loc,
                alpha_query,
                s.l_search,
                s.k_search,
            ),
            BuiltGraph::GeoGraph(store) => index::geograph::search(
                store,
                &self.dataset,
                self.e_kind,
                self.s_kind,
                query_emb,
                query_loc,
                alpha_query,
                s.l_search,
                s.k_search,
            ),
        };

        Ok(results)
    }

    /// The dataset this index was built from.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
