//! Small shared helpers that don't belong to any single component.
//!
//! - Safe type conversion macros (`checked_u32`), used by the adjacency
//!   exporter (§6) where ids are widened from `usize` to the wire format's
//!   `u32`.

pub mod convert;

pub use convert::checked_u32;
