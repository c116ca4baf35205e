//! Candidate-generation configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for level-wise candidate generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MinerConfig {
    /// Minimum fraction of structures a pattern must occur in. Default: 0.8.
    pub minimal_support: f64,
    /// Smallest pattern size reported. Default: 2.
    pub minimal_itemset_size: usize,
    /// Generation halts at this size even if candidates remain. Default: 10.
    pub maximal_itemset_size: usize,
    /// Cap on stored embeddings per itemset per structure. Default: 64.
    pub max_occurrences_per_structure: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            minimal_support: 0.8,
            minimal_itemset_size: 2,
            maximal_itemset_size: 10,
            max_occurrences_per_structure: 64,
        }
    }
}

impl MinerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.minimal_support.is_finite()
            || self.minimal_support <= 0.0
            || self.minimal_support > 1.0
        {
            return Err(ConfigError::InvalidSupport(self.minimal_support));
        }
        if self.minimal_itemset_size < 2 || self.maximal_itemset_size < self.minimal_itemset_size {
            return Err(ConfigError::InvalidItemsetSize {
                minimal: self.minimal_itemset_size,
                maximal: self.maximal_itemset_size,
            });
        }
        if self.max_occurrences_per_structure == 0 {
            return Err(ConfigError::NonPositive {
                name: "max-occurrences-per-structure",
                value: 0.0,
            });
        }
        Ok(())
    }
}
