//! Immutable configuration records.
//!
//! Records arrive already loaded (the engine does not read config files);
//! they are validated once at pipeline construction and passed by
//! reference through every stage, never mutated mid-run.

pub mod library_config;
pub mod metric_config;
pub mod miner_config;
pub mod significance_config;

pub use library_config::LibraryConfig;
pub use metric_config::{AdherenceMetricConfig, CohesionMetricConfig};
pub use miner_config::MinerConfig;
pub use significance_config::{SignificanceEstimatorConfig, SignificanceType};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Bundle of all records one mining run consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipelineConfig {
    pub miner: MinerConfig,
    pub cohesion: CohesionMetricConfig,
    pub adherence: AdherenceMetricConfig,
    pub significance: SignificanceEstimatorConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.miner.validate()?;
        self.cohesion.validate()?;
        self.adherence.validate()?;
        self.significance.validate()?;
        Ok(())
    }
}
