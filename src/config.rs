//! Configuration (A4): one struct per builder plus the shared search
//! config, loaded through a figment-style layered provider.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (caller-constructed struct, passed directly)
//! 2. Environment variables (`GEOGRAPH_*`)
//! 3. Configuration file (`geograph.toml`)
//! 4. Default values
//!
//! Field names mirror the keys recognized from the surrounding driver in
//! §6 exactly, so a driver's TOML file needs no translation layer.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Random init builder config (C6). Key: `S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomInitConfig {
    /// Edges sampled per node.
    pub s: usize,
    /// Build-time α used to scalarize the blended distance.
    pub alpha_build: f32,
    /// RNG seed; identical seed + `n_threads=1` gives a deterministic build.
    pub seed: u64,
    /// Worker thread count for the `rayon` pool (0 = rayon default).
    pub n_threads: usize,
}

impl Default for RandomInitConfig {
    fn default() -> Self {
        Self {
            s: 10,
            alpha_build: 0.5,
            seed: 42,
            n_threads: 0,
        }
    }
}

/// NSW / NSW-V2 builder config (C7). Keys: `NN`, `ef_construction`,
/// `n_threads`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NswConfig {
    /// Adjacency cap per node after insertion.
    pub nn: usize,
    /// Beam width during construction search.
    pub ef_construction: usize,
    /// Build-time α (V1 only; V2 sweeps a fixed probe set regardless).
    pub alpha_build: f32,
    /// RNG seed for any builder-side randomness.
    pub seed: u64,
    /// Worker thread count.
    pub n_threads: usize,
}

impl Default for NswConfig {
    fn default() -> Self {
        Self {
            nn: 16,
            ef_construction: 100,
            alpha_build: 0.5,
            seed: 42,
            n_threads: 0,
        }
    }
}

/// HNSW builder config (C8). Keys: `max_m`, `max_m0`, `mult`,
/// `ef_construction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnswConfig {
    /// Max connections per node above layer 0.
    pub max_m: usize,
    /// Max connections per node at layer 0.
    pub max_m0: usize,
    /// Level multiplier; `<= 0.0` means derive as `1 / ln(max_m)`.
    pub mult: f64,
    /// Beam width during construction search.
    pub ef_construction: usize,
    /// Build-time α.
    pub alpha_build: f32,
    /// RNG seed for level assignment.
    pub seed: u64,
    /// Worker thread count.
    pub n_threads: usize,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            max_m: 16,
            max_m0: 32,
            mult: -1.0,
            ef_construction: 200,
            alpha_build: 0.5,
            seed: 42,
            n_threads: 0,
        }
    }
}

impl HnswConfig {
    /// The effective level multiplier: `mult` if positive, else
    /// `1 / ln(max_m)`.
    #[must_use]
    pub fn level_mult(&self) -> f64 {
        if self.mult > 0.0 {
            self.mult
        } else {
            1.0 / (self.max_m as f64).ln()
        }
    }
}

/// GeoGraph builder config (C9). Keys: `max_m`, `ef_construction`,
/// `init_edge`, `candidate_edge`, `update_layer`, `ITER`, `rnn_size`,
/// `R_refine`, `L_refine`, `C_refine`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoGraphConfig {
    /// Max α-annotated out-edges kept per node.
    pub max_m: usize,
    /// Beam width during incremental-insert construction search.
    pub ef_construction: usize,
    /// Seed edges per node for the skyline-descent refinement path.
    pub init_edge: usize,
    /// Candidate pool size considered per NN-Descent join.
    pub candidate_edge: usize,
    /// How many layers of the skyline pool participate in one update.
    pub update_layer: usize,
    /// NN-Descent iteration count (`ITER`).
    pub iter: usize,
    /// Reverse-neighbor reservoir cap.
    pub rnn_size: usize,
    /// Refine-pass neighbor cap.
    pub r_refine: usize,
    /// Refine-pass beam width.
    pub l_refine: usize,
    /// Refine-pass candidate pool size.
    pub c_refine: usize,
    /// Minimum remaining usability measure to accept a `Geo2Neighbor`
    /// candidate. Hardcoded to `0.5` in the source material; kept
    /// configurable per §9's open question rather than assuming intent.
    pub accept_threshold: f32,
    /// Build-time α, used only where a builder step needs a scalar.
    pub alpha_build: f32,
    /// RNG seed.
    pub seed: u64,
    /// Worker thread count.
    pub n_threads: usize,
}

impl Default for GeoGraphConfig {
    fn default() -> Self {
        Self {
            max_m: 16,
            ef_construction: 200,
            init_edge: 10,
            candidate_edge: 50,
            update_layer: 4,
            iter: 6,
            rnn_size: 32,
            r_refine: 16,
            l_refine: 100,
            c_refine: 200,
            accept_threshold: 0.5,
            alpha_build: 0.5,
            seed: 42,
            n_threads: 0,
        }
    }
}

/// Router / query-time config (C10). Keys: `L_search`, `K_search`, `alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Beam width at query time.
    pub l_search: usize,
    /// Number of results returned.
    pub k_search: usize,
    /// Query-time α.
    pub alpha_query: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            l_search: 50,
            k_search: 10,
            alpha_query: 0.5,
        }
    }
}

/// Aggregate configuration for all four builders plus the search config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeoGraphIndexConfig {
    /// Random init builder settings.
    pub random_init: RandomInitConfig,
    /// NSW / NSW-V2 builder settings.
    pub nsw: NswConfig,
    /// HNSW builder settings.
    pub hnsw: HnswConfig,
    /// GeoGraph builder settings.
    pub geograph: GeoGraphConfig,
    /// Shared query-time settings.
    pub search: SearchConfig,
}

impl GeoGraphIndexConfig {
    /// Loads configuration layered over `geograph.toml` if present, then
    /// `GEOGRAPH_*` environment variables, on top of defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the file or environment values
    /// fail to parse into this shape.
    pub fn load() -> Result<Self> {
        Self::load_from_path("geograph.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GEOGRAPH_").split("_").lowercase(false));

        figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Validates cross-field and range constraints not expressible in the
    /// type system alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first violated
    /// constraint.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.alpha_query) {
            return Err(Error::InvalidConfig(format!(
                "search.alpha_query {} out of range [0, 1]",
                self.search.alpha_query
            )));
        }
        if self.search.k_search == 0 {
            return Err(Error::InvalidConfig(
                "search.k_search must be >= 1".to_string(),
            ));
        }
        if self.search.l_search < self.search.k_search {
            return Err(Error::InvalidConfig(
                "search.l_search must be >= search.k_search".to_string(),
            ));
        }
        if self.hnsw.max_m == 0 || self.hnsw.max_m0 == 0 {
            return Err(Error::InvalidConfig(
                "hnsw.max_m and hnsw.max_m0 must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.geograph.accept_threshold) {
            return Err(Error::InvalidConfig(format!(
                "geograph.accept_threshold {} out of range [0, 1]",
                self.geograph.accept_threshold
            )));
        }
        if self.geograph.max_m == 0 {
            return Err(Error::InvalidConfig(
                "geograph.max_m must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests;
