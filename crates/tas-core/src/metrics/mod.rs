//! Metrics collection abstraction for user directory operations.
//!
//! Backends (prometheus, etc) implement [`DirectoryMetrics`] and are handed to the directory service at construction.
mod backend;
pub use backend::{DirectoryMetrics, MetricsHandle, QueryOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
