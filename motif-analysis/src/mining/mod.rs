//! Level-wise candidate generation over structural adjacency graphs.

pub mod generator;
pub mod miner;

pub use generator::CandidateGenerator;
pub use miner::{ItemsetMiner, MiningReport};
