//! Extraction-metric configuration records.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration of the cohesion metric: how spatially compact an
/// occurrence may be before its pattern is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CohesionMetricConfig {
    /// Maximum accepted aggregate cohesion (median of per-occurrence mean
    /// pairwise distances), in distance units. Default: 10.0.
    pub maximal_cohesion: f64,
}

impl Default for CohesionMetricConfig {
    fn default() -> Self {
        Self {
            maximal_cohesion: 10.0,
        }
    }
}

impl CohesionMetricConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.maximal_cohesion.is_finite() || self.maximal_cohesion <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "maximal-cohesion",
                value: self.maximal_cohesion,
            });
        }
        Ok(())
    }
}

/// Configuration of the adherence metric: how far an occurrence may
/// deviate from its pattern's consensus geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdherenceMetricConfig {
    /// Maximum accepted mean deviation from the consensus geometry.
    /// Default: 4.0.
    pub maximal_adherence: f64,
}

impl Default for AdherenceMetricConfig {
    fn default() -> Self {
        Self {
            maximal_adherence: 4.0,
        }
    }
}

impl AdherenceMetricConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.maximal_adherence.is_finite() || self.maximal_adherence <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "maximal-adherence",
                value: self.maximal_adherence,
            });
        }
        Ok(())
    }
}
