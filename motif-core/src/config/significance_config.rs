//! Significance-estimator configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Sentinel for "use all available compute units".
pub const AUTO_PARALLELISM: i32 = -1;

const DEFAULT_KS_CUTOFF: f64 = 0.1;
const DEFAULT_SIGNIFICANCE_CUTOFF: f64 = 1e-3;
const DEFAULT_SAMPLE_SIZE: usize = 30;
const DEFAULT_SEED: u64 = 42;

/// Which extraction metric the significance test is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignificanceType {
    Cohesion,
    Adherence,
}

/// Parameter bundle for the resampling-based significance test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SignificanceEstimatorConfig {
    /// Test variant: which extraction metric scores the null model.
    pub significance_type: SignificanceType,
    /// Minimum two-sample comparison statistic. Default: 0.1.
    pub ks_cutoff: f64,
    /// Maximum p-value for a significant verdict. Default: 1e-3.
    pub significance_cutoff: f64,
    /// Worker count; -1 means all available compute units. Default: -1.
    pub level_of_parallelism: i32,
    /// Resampled itemsets drawn per null-distribution estimate. Default: 30.
    pub sample_size: usize,
    /// Base seed for the resampling RNG; runs with equal seeds produce
    /// identical verdicts. Default: 42.
    pub seed: u64,
}

impl Default for SignificanceEstimatorConfig {
    fn default() -> Self {
        Self {
            significance_type: SignificanceType::Cohesion,
            ks_cutoff: DEFAULT_KS_CUTOFF,
            significance_cutoff: DEFAULT_SIGNIFICANCE_CUTOFF,
            level_of_parallelism: AUTO_PARALLELISM,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SignificanceEstimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ks_cutoff.is_finite() || self.ks_cutoff <= 0.0 || self.ks_cutoff > 1.0 {
            return Err(ConfigError::NonPositive {
                name: "ks-cutoff",
                value: self.ks_cutoff,
            });
        }
        if !self.significance_cutoff.is_finite()
            || self.significance_cutoff <= 0.0
            || self.significance_cutoff > 1.0
        {
            return Err(ConfigError::NonPositive {
                name: "significance-cutoff",
                value: self.significance_cutoff,
            });
        }
        if self.sample_size < 2 {
            return Err(ConfigError::InvalidSampleSize(self.sample_size));
        }
        Ok(())
    }

    /// Resolve the worker count once at pipeline start: the sentinel (or
    /// any non-positive value) maps to all available compute units.
    pub fn resolved_parallelism(&self) -> usize {
        if self.level_of_parallelism > 0 {
            self.level_of_parallelism as usize
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}
