//! Statistical dependence between itemsets.

pub mod mutual_information;

pub use mutual_information::{
    entropy, mutual_information, normalized_mutual_information, presence_from_occurrences,
};

use petgraph::graph::UnGraph;

use motif_core::errors::AssociationError;

/// Dependence between two itemsets, indexed into the analyzed slice.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationPair {
    pub first: usize,
    pub second: usize,
    pub mutual_information: f64,
    pub normalized: f64,
}

/// Ranks itemset pairs by mutual information over their per-structure
/// presence vectors and exposes the association graph the library
/// clusters on.
pub struct AssociationAnalyzer;

impl AssociationAnalyzer {
    /// All pairs, strongest dependence first; ties break on the index
    /// pair so the ranking is deterministic.
    pub fn rank_pairs(presence: &[Vec<bool>]) -> Result<Vec<AssociationPair>, AssociationError> {
        let mut pairs = Vec::new();
        for first in 0..presence.len() {
            for second in first + 1..presence.len() {
                let mi = mutual_information(&presence[first], &presence[second])?;
                let normalized =
                    normalized_mutual_information(&presence[first], &presence[second])?;
                pairs.push(AssociationPair {
                    first,
                    second,
                    mutual_information: mi,
                    normalized,
                });
            }
        }
        pairs.sort_by(|a, b| {
            b.mutual_information
                .partial_cmp(&a.mutual_information)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.first.cmp(&b.first))
                .then(a.second.cmp(&b.second))
        });
        Ok(pairs)
    }

    /// Undirected graph connecting itemset indices whose normalized
    /// mutual information reaches `cutoff`; edge weights carry the NMI.
    pub fn association_graph(
        pairs: &[AssociationPair],
        item_count: usize,
        cutoff: f64,
    ) -> UnGraph<usize, f64> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..item_count).map(|i| graph.add_node(i)).collect();
        for pair in pairs {
            if pair.normalized >= cutoff {
                graph.add_edge(nodes[pair.first], nodes[pair.second], pair.normalized);
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_is_strongest_first() {
        let a = vec![true, true, false, false];
        let b = vec![true, true, false, false]; // identical to a
        let c = vec![true, false, true, false]; // independent of a
        let pairs = AssociationAnalyzer::rank_pairs(&[a, b, c]).unwrap();
        assert_eq!((pairs[0].first, pairs[0].second), (0, 1));
        assert!(pairs[0].mutual_information > pairs.last().unwrap().mutual_information);
    }

    #[test]
    fn graph_connects_only_above_cutoff() {
        let a = vec![true, true, false, false];
        let b = vec![true, true, false, false];
        let c = vec![true, false, true, false];
        let pairs = AssociationAnalyzer::rank_pairs(&[a, b, c]).unwrap();
        let graph = AssociationAnalyzer::association_graph(&pairs, 3, 0.5);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }
}
