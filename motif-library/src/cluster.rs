//! Association-based clustering of validated itemsets.
//!
//! Two itemsets land in the same cluster when their normalized mutual
//! information reaches the association cutoff (single linkage via
//! union-find). Clusters below the minimum size are dropped; the rest are
//! scored by their best member p-value.

use petgraph::unionfind::UnionFind;

use motif_core::config::LibraryConfig;
use motif_core::errors::LibraryError;
use motif_core::types::collections::FxHashMap;

use motif_analysis::association::normalized_mutual_information;

use crate::model::ValidatedItemset;

/// One cluster of validated itemsets, indexed into the input slice.
#[derive(Debug, Clone)]
pub struct ItemsetCluster {
    /// Member indices, ascending.
    pub members: Vec<usize>,
    /// The most specific member: largest itemset, then lowest metric
    /// aggregate, then identifier. A subsumed sub-pattern never outranks
    /// the fuller pattern it co-occurs with.
    pub representative: usize,
    /// Best (lowest) member p-value; the cluster's score.
    pub p_value: f64,
}

/// Cluster the validated itemsets and order clusters best-first
/// (ascending p-value, then representative identifier).
pub fn cluster_validated(
    validated: &[ValidatedItemset],
    config: &LibraryConfig,
) -> Result<Vec<ItemsetCluster>, LibraryError> {
    if validated.is_empty() {
        return Ok(Vec::new());
    }

    let mut union_find: UnionFind<usize> = UnionFind::new(validated.len());
    for first in 0..validated.len() {
        for second in first + 1..validated.len() {
            let association = normalized_mutual_information(
                &validated[first].presence,
                &validated[second].presence,
            )?;
            if association >= config.association_cutoff {
                union_find.union(first, second);
            }
        }
    }

    let mut groups: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for index in 0..validated.len() {
        groups.entry(union_find.find(index)).or_default().push(index);
    }

    let mut clusters: Vec<ItemsetCluster> = groups
        .into_values()
        .filter(|members| members.len() >= config.minimal_cluster_size)
        .map(|mut members| {
            members.sort_unstable();
            let representative = members
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    validated[b]
                        .itemset
                        .size()
                        .cmp(&validated[a].itemset.size())
                        .then(
                            validated[a]
                                .aggregate_score
                                .partial_cmp(&validated[b].aggregate_score)
                                .unwrap_or(std::cmp::Ordering::Equal),
                        )
                        .then_with(|| {
                            validated[a]
                                .itemset
                                .identifier()
                                .cmp(&validated[b].itemset.identifier())
                        })
                })
                .unwrap_or(members[0]);
            let p_value = members
                .iter()
                .map(|&index| validated[index].p_value)
                .fold(f64::INFINITY, f64::min);
            ItemsetCluster {
                members,
                representative,
                p_value,
            }
        })
        .collect();

    clusters.sort_by(|a, b| {
        a.p_value
            .partial_cmp(&b.p_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                validated[a.representative]
                    .itemset
                    .identifier()
                    .cmp(&validated[b.representative].itemset.identifier())
            })
    });

    tracing::debug!(clusters = clusters.len(), "itemsets clustered");
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::types::{Itemset, Occurrence};

    fn validated(
        labels: [&str; 2],
        presence: Vec<bool>,
        p_value: f64,
        aggregate: f64,
    ) -> ValidatedItemset {
        ValidatedItemset {
            itemset: Itemset::of(labels).with_support(0.5),
            p_value,
            aggregate_score: aggregate,
            occurrence_scores: vec![aggregate],
            occurrences: vec![Occurrence::new(0, vec![])],
            presence,
        }
    }

    #[test]
    fn identical_presence_merges_into_one_cluster() {
        let presence = vec![true, true, false, false];
        let items = vec![
            validated(["A", "B"], presence.clone(), 1e-6, 2.0),
            validated(["C", "D"], presence.clone(), 1e-5, 1.0),
            validated(["E", "F"], vec![true, false, true, false], 1e-4, 3.0),
        ];
        let clusters = cluster_validated(&items, &LibraryConfig::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        // Best p-value cluster first; its representative has the lowest
        // aggregate score.
        assert_eq!(clusters[0].members, vec![0, 1]);
        assert_eq!(clusters[0].representative, 1);
        assert!((clusters[0].p_value - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn small_clusters_are_dropped() {
        // Statistically independent presences: neither links to the other.
        let items = vec![
            validated(["A", "B"], vec![true, true, false, false], 1e-6, 1.0),
            validated(["C", "D"], vec![true, false, true, false], 1e-6, 1.0),
        ];
        let config = LibraryConfig {
            minimal_cluster_size: 2,
            ..Default::default()
        };
        let clusters = cluster_validated(&items, &config).unwrap();
        assert!(clusters.is_empty());
    }
}
