//! Dataset model (A1): the immutable base-point table builders and routers
//! search over.
//!
//! A thin owning wrapper around two flat `Vec<f32>` buffers plus
//! `(n, d_e, d_s)`, matching the "contiguous arena, no owning references"
//! design noted in §9: ids are plain indices into these buffers, never
//! pointers.

use crate::error::{Error, Result};

/// Base point table: `N` ids, each with an embedding row of width `d_e` and
/// a location row of width `d_s`.
#[derive(Debug, Clone)]
pub struct Dataset {
    n: usize,
    d_e: usize,
    d_s: usize,
    embeddings: Vec<f32>,
    locations: Vec<f32>,
}

impl Dataset {
    /// Builds a dataset from flat row-major buffers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if `n == 0`, or
    /// [`Error::DimensionMismatch`] if either buffer's length doesn't match
    /// `n * d_e` / `n * d_s`.
    pub fn new(
        embeddings: Vec<f32>,
        locations: Vec<f32>,
        n: usize,
        d_e: usize,
        d_s: usize,
    ) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyDataset);
        }
        if embeddings.len() != n * d_e {
            return Err(Error::DimensionMismatch {
                expected: n * d_e,
                actual: embeddings.len(),
            });
        }
        if locations.len() != n * d_s {
            return Err(Error::DimensionMismatch {
                expected: n * d_s,
                actual: locations.len(),
            });
        }
        Ok(Self {
            n,
            d_e,
            d_s,
            embeddings,
            locations,
        })
    }

    /// Number of base points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if this dataset carries no points. Cannot happen for a
    /// successfully constructed `Dataset`; kept for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Embedding row width.
    #[inline]
    #[must_use]
    pub fn embedding_dim(&self) -> usize {
        self.d_e
    }

    /// Location row width.
    #[inline]
    #[must_use]
    pub fn location_dim(&self) -> usize {
        self.d_s
    }

    /// Borrows the embedding row for id `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    #[must_use]
    pub fn embedding(&self, i: usize) -> &[f32] {
        let start = i * self.d_e;
        &self.embeddings[start..start + self.d_e]
    }

    /// Borrows the location row for id `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    #[must_use]
    pub fn location(&self, i: usize) -> &[f32] {
        let start = i * self.d_s;
        &self.locations[start..start + self.d_s]
    }

    /// Validates that a query row pair matches this dataset's dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] on any width mismatch.
    pub fn validate_query(&self, query_emb: &[f32], query_loc: &[f32]) -> Result<()> {
        if query_emb.len() != self.d_e {
            return Err(Error::DimensionMismatch {
                expected: self.d_e,
                actual: query_emb.len(),
            });
        }
        if query_loc.len() != self.d_s {
            return Err(Error::DimensionMismatch {
                expected: self.d_s,
                actual: query_loc.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod dataset_tests;
