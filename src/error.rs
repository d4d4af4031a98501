//! Error types for the GeoGraph index core.
//!
//! One variant per error kind a builder or router can surface to its caller;
//! see the error code on [`Error::code`] for a stable identifier across
//! versions.

use thiserror::Error;

/// Result type alias for GeoGraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a GeoGraph index.
#[derive(Error, Debug)]
pub enum Error {
    /// A builder or router parameter was missing or out of its valid range,
    /// or an unknown distance kind was requested (GEO-001).
    #[error("[GEO-001] invalid config: {0}")]
    InvalidConfig(String),

    /// A query vector's dimensionality did not match the base dataset (GEO-002).
    #[error("[GEO-002] dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the dataset was built with.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
    },

    /// The base dataset had zero points (GEO-003).
    #[error("[GEO-003] dataset is empty")]
    EmptyDataset,

    /// Allocation failed while building the graph (GEO-004).
    #[error("[GEO-004] out of memory: {0}")]
    OutOfMemory(String),

    /// A GeoGraph edge's usability interval set became empty mid-prune (GEO-005).
    ///
    /// Should not occur with correct interval arithmetic; indicates a bug in
    /// the pruning pipeline rather than an expected runtime condition.
    #[error("[GEO-005] inconsistent geograph state: {0}")]
    Inconsistent(String),

    /// I/O failure while reading or writing a serialized adjacency dump (GEO-006).
    #[error("[GEO-006] io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure encoding or decoding the adjacency wire format (GEO-007).
    #[error("[GEO-007] serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the stable error code (e.g. `"GEO-001"`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "GEO-001",
            Self::DimensionMismatch { .. } => "GEO-002",
            Self::EmptyDataset => "GEO-003",
            Self::OutOfMemory(_) => "GEO-004",
            Self::Inconsistent(_) => "GEO-005",
            Self::Io(_) => "GEO-006",
            Self::Serialization(_) => "GEO-007",
        }
    }
}

#[cfg(test)]
mod error_tests;
