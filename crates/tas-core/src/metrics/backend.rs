use std::sync::Arc;

/// Outcome of a directory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Operation returned data.
    Success,
    /// Lookup completed but matched nothing.
    NotFound,
    /// Backing store error.
    Failure,
}

impl QueryOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            QueryOutcome::Success => "success",
            QueryOutcome::NotFound => "not_found",
            QueryOutcome::Failure => "failure",
        }
    }
}

/// Backend metrics collection interface.
pub trait DirectoryMetrics: Send + Sync + 'static {
    /// Record a finished directory operation.
    ///
    /// # Arguments
    /// - `operation`: Operation name (`"find all users"`, `"find user"`, `"health check"`)
    /// - `outcome`: How the operation ended
    /// - `duration_ms`: Wall time in milliseconds
    fn record_query(&self, operation: &str, outcome: QueryOutcome, duration_ms: u64);

    /// Record how many users an operation returned.
    fn record_users_returned(&self, operation: &str, count: usize);

    /// Record a seeding run of a users initializer.
    fn record_seed(&self, initializer: &str, outcome: QueryOutcome);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn DirectoryMetrics>;
