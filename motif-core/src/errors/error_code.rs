//! Stable machine-readable error codes.

pub const GENERATION_ERROR: &str = "MOTIF_GENERATION";
pub const METRIC_ERROR: &str = "MOTIF_METRIC";
pub const ASSOCIATION_ERROR: &str = "MOTIF_ASSOCIATION";
pub const SIGNIFICANCE_ERROR: &str = "MOTIF_SIGNIFICANCE";
pub const LIBRARY_ERROR: &str = "MOTIF_LIBRARY";
pub const CONFIG_ERROR: &str = "MOTIF_CONFIG";
pub const CANCELLED: &str = "MOTIF_CANCELLED";

/// Maps every engine error to a stable code string for logs and callers.
pub trait MotifErrorCode {
    fn error_code(&self) -> &'static str;
}
