//! Distance kernels (C1): the two scalar metrics `E` (embedding space) and
//! `S` (location space) that the composite blend `d(p,q;α) = α·E + (1−α)·S`
//! is built from.
//!
//! Kernels are plain functions over flat `&[f32]` rows plus an explicit
//! dimension, matching the teacher's "inputs assumed valid, bounds-checked by
//! caller" contract: no panics on length mismatch in release, callers are
//! expected to slice rows out of a validated [`crate::dataset::Dataset`].

use serde::{Deserialize, Serialize};

/// Which scalar kernel to use for a distance role (embedding or location).
///
/// `SquaredL2` is the default for both roles per §4.1; `L2` and `Haversine`
/// are offered as alternates. `Haversine` assumes its two input rows are
/// `[lat, lon]` in radians and is only meaningful for `D == 2` location rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    /// Squared Euclidean distance. Cheapest: no square root.
    SquaredL2,
    /// Euclidean (L2) distance.
    L2,
    /// Great-circle distance between two `[lat, lon]` points, in radians,
    /// scaled by Earth's mean radius (kilometers).
    Haversine,
}

/// Earth's mean radius in kilometers, used to scale [`DistanceKind::Haversine`].
pub const EARTH_RADIUS_KM: f32 = 6371.0;

impl DistanceKind {
    /// Computes the distance between two rows of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Debug builds assert `a.len() == dim && b.len() == dim`. Release
    /// builds trust the caller, matching the teacher's distance-engine
    /// contract.
    #[inline]
    #[must_use]
    pub fn distance(self, a: &[f32], b: &[f32], dim: usize) -> f32 {
        debug_assert_eq!(a.len(), dim);
        debug_assert_eq!(b.len(), dim);
        match self {
            Self::SquaredL2 => squared_l2(a, b),
            Self::L2 => squared_l2(a, b).sqrt(),
            Self::Haversine => haversine(a, b),
        }
    }
}

impl Default for DistanceKind {
    fn default() -> Self {
        Self::SquaredL2
    }
}

/// Squared Euclidean distance between two equal-length rows.
#[inline]
#[must_use]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean (L2) distance between two equal-length rows.
#[inline]
#[must_use]
pub fn l2(a: &[f32], b: &[f32]) -> f32 {
    squared_l2(a, b).sqrt()
}

/// Great-circle (haversine) distance in kilometers between two `[lat, lon]`
/// rows given in radians.
///
/// Rows with fewer than 2 elements are treated as coincident (distance 0);
/// this keeps the kernel total and panic-free for degenerate `D_s` configs.
#[inline]
#[must_use]
pub fn haversine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }
    let (lat1, lon1) = (a[0], a[1]);
    let (lat2, lon2) = (b[0], b[1]);
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Blends an embedding distance `e` and a location distance `s` under `α`.
///
/// `d(p,q;α) = α·e + (1−α)·s`, the composite used throughout §3-§4.
#[inline]
#[must_use]
pub fn blend(alpha: f32, e: f32, s: f32) -> f32 {
    alpha.mul_add(e, (1.0 - alpha) * s)
}

#[cfg(test)]
mod distance_tests;
