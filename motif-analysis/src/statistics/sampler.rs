//! Null-model sampling.
//!
//! Draws random same-size vertex sets from the structure population with
//! no connectivity or cohesion preference. Scored with the same
//! extraction metric as the real candidates, the draws form the empirical
//! null distribution a candidate is compared against.

use rand::rngs::StdRng;
use rand::Rng;

use motif_core::errors::SignificanceError;
use motif_core::types::{Occurrence, StructureCollection, StructureGraph};
use petgraph::graph::NodeIndex;

/// Draws pseudo-occurrences from the structure population.
pub struct NullModelSampler<'a> {
    collection: &'a StructureCollection,
    /// Structures that passed validation; malformed ones never enter the
    /// null model.
    valid: Vec<bool>,
}

impl<'a> NullModelSampler<'a> {
    pub fn new(collection: &'a StructureCollection) -> Self {
        let valid = collection
            .iter()
            .map(|structure| structure.validate().is_ok())
            .collect();
        Self { collection, valid }
    }

    /// Draw `count` random vertex sets of `size` distinct vertices each.
    ///
    /// Every draw picks a structure uniformly among those large enough,
    /// then samples vertices uniformly without replacement.
    pub fn sample(
        &self,
        identifier: &str,
        size: usize,
        count: usize,
        rng: &mut StdRng,
    ) -> Result<Vec<Occurrence>, SignificanceError> {
        let eligible: Vec<(usize, &StructureGraph)> = self
            .collection
            .enumerate()
            .filter(|(index, structure)| {
                self.valid[*index] && structure.element_count() >= size
            })
            .collect();

        if eligible.is_empty() {
            return Err(SignificanceError::InsufficientPopulation {
                identifier: identifier.to_string(),
                size,
                sampled: 0,
                required: 2,
            });
        }

        let mut draws = Vec::with_capacity(count);
        for _ in 0..count {
            let (structure_index, structure) = eligible[rng.random_range(0..eligible.len())];
            let vertices: Vec<NodeIndex> =
                rand::seq::index::sample(rng, structure.element_count(), size)
                    .into_iter()
                    .map(NodeIndex::new)
                    .collect();
            draws.push(Occurrence::new(structure_index, vertices));
        }
        Ok(draws)
    }
}
