use crate::metrics::backend::{DirectoryMetrics, QueryOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl DirectoryMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_query(&self, _: &str, _: QueryOutcome, _: u64) {}

    #[inline(always)]
    fn record_users_returned(&self, _: &str, _: usize) {}

    #[inline(always)]
    fn record_seed(&self, _: &str, _: QueryOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(QueryOutcome::Success.as_label(), "success");
        assert_eq!(QueryOutcome::NotFound.as_label(), "not_found");
        assert_eq!(QueryOutcome::Failure.as_label(), "failure");
    }
}
