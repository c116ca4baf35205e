//! Library-assembly configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for clustering validated itemsets into library entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LibraryConfig {
    /// Minimum itemsets per cluster; smaller clusters are dropped.
    /// Default: 1.
    pub minimal_cluster_size: usize,
    /// Maximum library entries; best-scoring clusters win. Default: 100.
    pub maximal_entries: usize,
    /// Minimum normalized mutual information linking two itemsets into the
    /// same cluster. Default: 0.4.
    pub association_cutoff: f64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            minimal_cluster_size: 1,
            maximal_entries: 100,
            association_cutoff: 0.4,
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimal_cluster_size == 0 {
            return Err(ConfigError::NonPositive {
                name: "minimal-cluster-size",
                value: 0.0,
            });
        }
        if self.maximal_entries == 0 {
            return Err(ConfigError::InvalidMaximalEntries);
        }
        if !self.association_cutoff.is_finite()
            || !(0.0..=1.0).contains(&self.association_cutoff)
        {
            return Err(ConfigError::InvalidAssociationCutoff(self.association_cutoff));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LibraryConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_entries() {
        let config = LibraryConfig {
            maximal_entries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_association_cutoff() {
        let config = LibraryConfig {
            association_cutoff: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
