//! Items and itemsets — the pattern value model.

use std::cmp::Ordering;
use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Categorical identity of a structural element.
pub type Label = String;

/// One labeled element inside a specific structure.
///
/// Equality and ordering are defined by label plus positional identity
/// (structure index and serial), never by coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub label: Label,
    pub structure: usize,
    pub serial: u32,
    pub vertex: NodeIndex,
}

impl Item {
    pub fn new(label: impl Into<Label>, structure: usize, serial: u32, vertex: NodeIndex) -> Self {
        Self {
            label: label.into(),
            structure,
            serial,
            vertex,
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label
            .cmp(&other.label)
            .then(self.structure.cmp(&other.structure))
            .then(self.serial.cmp(&other.serial))
            .then(self.vertex.index().cmp(&other.vertex.index()))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A discovered pattern: a canonically ordered label multiset plus the
/// support it reached across the structure collection.
///
/// Two itemsets are the same pattern iff their sorted label sequences are
/// equal, regardless of originating structures. Support is set once when
/// the aggregate pattern is created and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itemset {
    labels: Vec<Label>,
    support: f64,
}

impl Itemset {
    /// Create a pattern from labels; the sequence is sorted canonically.
    pub fn of<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let mut labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        Self {
            labels,
            support: 0.0,
        }
    }

    /// Same pattern with support attached; consumed at aggregation time.
    pub fn with_support(mut self, support: f64) -> Self {
        self.support = support;
        self
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    /// Canonical string identity: sorted labels joined with `-`.
    pub fn identifier(&self) -> String {
        self.labels.join("-")
    }

    /// Multiset containment: every label of `other`, with multiplicity,
    /// occurs among this itemset's labels. Both sequences are sorted.
    pub fn contains_labels(&self, other: &Itemset) -> bool {
        let mut mine = self.labels.iter();
        'outer: for needle in &other.labels {
            for candidate in mine.by_ref() {
                match candidate.cmp(needle) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }
}

impl PartialEq for Itemset {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Itemset {}

impl std::hash::Hash for Itemset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.labels.hash(state);
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Itemset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels
            .len()
            .cmp(&other.labels.len())
            .then_with(|| self.labels.cmp(&other.labels))
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[support={:.4}]", self.identifier(), self.support)
    }
}
