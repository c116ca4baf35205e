//! Cross-cutting capabilities.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken};
