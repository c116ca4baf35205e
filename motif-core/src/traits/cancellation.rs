//! Cooperative cancellation for long-running mining runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Capability checked at safe points: between candidate-generation levels
/// and between itemset evaluations. In-flight evaluations always run to
/// completion so no partially computed significance state survives.
pub trait Cancellable: Sync {
    /// Whether cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);
}

/// Shared atomic-flag token handed to a run by its caller.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        tracing::debug!("cancellation requested");
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
