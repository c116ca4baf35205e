//! Value types shared across the mining pipeline.

pub mod collections;
pub mod distribution;
pub mod itemset;
pub mod occurrence;
pub mod structure;

pub use distribution::Distribution;
pub use itemset::{Item, Itemset, Label};
pub use occurrence::Occurrence;
pub use structure::{Contact, Element, StructureCollection, StructureGraph, StructureId};
