//! Index construction and routing: the shared building blocks (visited
//! sets, bounded heaps, node storage, skyline queues) and the four graph
//! builders with their routers — random-init, NSW/NSW-V2, HNSW, and
//! GeoGraph — plus the generic greedy pool router.

pub mod beam;
pub mod geograph;
pub mod greedy;
pub mod heap;
pub mod hnsw;
pub mod node;
pub mod nsw;
pub mod random_init;
pub mod skyline;
pub mod visited;

pub use node::{NodeId, NodeStore};
pub use visited::VisitedSet;
