//! GeoGraph (C9): α-interval edge annotations, the `Geo2Neighbor` prune
//! heuristic, and the incremental-insert builder/router built on them.

pub mod builder;
pub mod interval;
pub mod prune;
pub mod router;
pub mod store;

pub use builder::build;
pub use interval::IntervalSet;
pub use prune::{geo2neighbor, pruned_by, PrunedNeighbor};
pub use router::search;
pub use store::{GeoEdge, GeoNodeStore};
