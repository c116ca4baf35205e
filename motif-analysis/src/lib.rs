//! # motif-analysis
//!
//! The discovery-and-validation pipeline over structural adjacency graphs:
//! level-wise candidate generation, geometric extraction metrics
//! (cohesion, adherence), association analysis (mutual information), and
//! resampling-based significance estimation.

pub mod association;
pub mod metrics;
pub mod mining;
pub mod pipeline;
pub mod statistics;
