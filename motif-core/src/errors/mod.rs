//! Error handling for the motif engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod association_error;
pub mod config_error;
pub mod error_code;
pub mod generation_error;
pub mod library_error;
pub mod metric_error;
pub mod pipeline_error;
pub mod significance_error;

pub use association_error::AssociationError;
pub use config_error::ConfigError;
pub use error_code::MotifErrorCode;
pub use generation_error::GenerationError;
pub use library_error::LibraryError;
pub use metric_error::MetricError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use significance_error::SignificanceError;
