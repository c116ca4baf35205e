//! Per-structure adjacency graph and the read-only structure collection.
//!
//! Vertices carry a categorical label and 3-D coordinates, edges denote
//! spatial contact. Graphs are built once by the caller from parsed
//! structure records and are never mutated by the pipeline.

use std::fmt;
use std::fmt::Write as _;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::types::collections::FxHashMap;
use crate::types::itemset::Label;

/// Identifier of one structure in the collection (e.g. a PDB id plus chain).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(String);

impl StructureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled structural element: one vertex of the adjacency graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Categorical identity, e.g. a residue or chemical-group type.
    pub label: Label,
    /// Positional identity inside the source structure.
    pub serial: u32,
    /// Cartesian coordinates in distance units.
    pub position: [f64; 3],
}

/// Spatial contact between two elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Euclidean distance between the endpoints at graph construction time.
    pub distance: f64,
}

/// Adjacency graph of one structure.
#[derive(Debug, Clone)]
pub struct StructureGraph {
    id: StructureId,
    graph: UnGraph<Element, Contact>,
}

impl StructureGraph {
    pub fn new(id: StructureId) -> Self {
        Self {
            id,
            graph: UnGraph::default(),
        }
    }

    pub fn id(&self) -> &StructureId {
        &self.id
    }

    pub fn add_element(
        &mut self,
        label: impl Into<Label>,
        serial: u32,
        position: [f64; 3],
    ) -> NodeIndex {
        self.graph.add_node(Element {
            label: label.into(),
            serial,
            position,
        })
    }

    /// Connect two elements, recording their Euclidean distance.
    pub fn add_contact(&mut self, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
        let distance = euclidean(
            self.graph[a].position,
            self.graph[b].position,
        );
        self.graph.add_edge(a, b, Contact { distance })
    }

    /// Connect every element pair within `cutoff` distance units.
    ///
    /// Convenience for callers (and tests) that derive adjacency from
    /// coordinates alone rather than supplying explicit contacts.
    pub fn connect_within(&mut self, cutoff: f64) {
        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                let distance = euclidean(self.graph[a].position, self.graph[b].position);
                if distance <= cutoff {
                    self.graph.add_edge(a, b, Contact { distance });
                }
            }
        }
    }

    /// Element payload of a vertex obtained from this graph.
    pub fn element(&self, index: NodeIndex) -> &Element {
        &self.graph[index]
    }

    /// Checked lookup for indices of unknown provenance.
    pub fn try_element(&self, index: NodeIndex) -> Option<&Element> {
        self.graph.node_weight(index)
    }

    pub fn element_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contact_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index)
    }

    pub fn contacts(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Contact)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Whether `a` and `b` are adjacent in the contact graph.
    pub fn adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    /// Label histogram of all elements.
    pub fn label_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for index in self.graph.node_indices() {
            *counts.entry(self.graph[index].label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Check structural integrity: finite coordinates, non-empty labels,
    /// no self-contacts. Violations exclude the structure from mining.
    pub fn validate(&self) -> Result<(), GenerationError> {
        for index in self.graph.node_indices() {
            let element = &self.graph[index];
            if element.label.is_empty() {
                return Err(GenerationError::MalformedStructure {
                    structure: self.id.to_string(),
                    reason: format!("element {} has an empty label", element.serial),
                });
            }
            if element.position.iter().any(|c| !c.is_finite()) {
                return Err(GenerationError::MalformedStructure {
                    structure: self.id.to_string(),
                    reason: format!("element {} has non-finite coordinates", element.serial),
                });
            }
        }
        use petgraph::visit::EdgeRef;
        for edge in self.graph.edge_references() {
            if edge.source() == edge.target() {
                return Err(GenerationError::MalformedStructure {
                    structure: self.id.to_string(),
                    reason: "self-contact in adjacency graph".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Render the given elements as PDB-format fragment text.
    ///
    /// One ATOM record per element, in the given order, terminated by END.
    /// This is the outbound surface the library uses to embed a
    /// representative occurrence into an archive entry.
    pub fn render_fragment(&self, vertices: &[NodeIndex]) -> String {
        let mut lines = String::new();
        for (i, &index) in vertices.iter().enumerate() {
            let element = &self.graph[index];
            let residue: String = element.label.chars().take(3).collect();
            let [x, y, z] = element.position;
            let _ = writeln!(
                lines,
                "ATOM  {:>5}  CA  {:<3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00",
                i + 1,
                residue.to_uppercase(),
                element.serial,
                x,
                y,
                z,
            );
        }
        lines.push_str("END\n");
        lines
    }
}

/// Ordered, read-only collection of structure graphs.
///
/// Shared immutably across every parallel stage of the pipeline.
#[derive(Debug, Default)]
pub struct StructureCollection {
    structures: Vec<StructureGraph>,
}

impl StructureCollection {
    pub fn new(structures: Vec<StructureGraph>) -> Self {
        Self { structures }
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StructureGraph> {
        self.structures.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureGraph> {
        self.structures.iter()
    }

    /// Indices paired with their graphs, the shape most stages iterate over.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &StructureGraph)> {
        self.structures.iter().enumerate()
    }
}

fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
