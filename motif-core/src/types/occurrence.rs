//! Concrete embeddings of an itemset inside one structure.

use petgraph::graph::NodeIndex;

use crate::types::itemset::Item;
use crate::types::structure::StructureCollection;

/// One instantiation of an itemset's label pattern within one structure:
/// the concrete vertices whose coordinates the metrics evaluate.
///
/// Many occurrences map to one itemset. Occurrences are ephemeral — they
/// live through metric evaluation and representative selection and are
/// never persisted individually.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    /// Index of the owning structure in the collection.
    pub structure: usize,
    /// Member vertices, sorted by index for canonical identity.
    pub vertices: Vec<NodeIndex>,
}

impl Occurrence {
    pub fn new(structure: usize, mut vertices: Vec<NodeIndex>) -> Self {
        vertices.sort();
        Self {
            structure,
            vertices,
        }
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Member coordinates looked up in the owning structure.
    ///
    /// Returns `None` when the structure or any vertex is out of bounds.
    pub fn positions(&self, collection: &StructureCollection) -> Option<Vec<[f64; 3]>> {
        let graph = collection.get(self.structure)?;
        self.vertices
            .iter()
            .map(|&v| graph.try_element(v).map(|element| element.position))
            .collect()
    }

    /// Materialize the member items (label + positional identity).
    pub fn items(&self, collection: &StructureCollection) -> Option<Vec<Item>> {
        let graph = collection.get(self.structure)?;
        let mut items = self
            .vertices
            .iter()
            .map(|&v| {
                graph
                    .try_element(v)
                    .map(|element| Item::new(element.label.clone(), self.structure, element.serial, v))
            })
            .collect::<Option<Vec<Item>>>()?;
        items.sort();
        Some(items)
    }
}
