//! Resampling-based significance estimation.

pub mod ks;
pub mod sampler;
pub mod significance;

pub use sampler::NullModelSampler;
pub use significance::{
    EvaluationState, SignificanceEstimator, SignificanceRecord, SignificanceTarget, Verdict,
};
