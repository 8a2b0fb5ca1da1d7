use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use tas_core::{DirectoryMetrics, QueryOutcome};

/// Prometheus metrics backend for the user directory.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `operation`: "find all users", "find user", "health check"
/// - `outcome`: "success", "not_found", "failure"
/// - `initializer`: names of registered users initializers
#[derive(Clone)]
pub struct PrometheusMetrics {
    queries: CounterVec,
    query_duration: HistogramVec,
    users_returned: HistogramVec,
    seed_runs: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create the backend and register its collectors in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let queries = CounterVec::new(
            Opts::new("queries_total", "Total number of directory operations").namespace("tas_directory"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(queries.clone()))?;

        let query_duration = HistogramVec::new(
            HistogramOpts::new("query_duration_seconds", "Directory operation duration in seconds")
                .namespace("tas_directory")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(query_duration.clone()))?;

        let users_returned = HistogramVec::new(
            HistogramOpts::new("users_returned", "Users returned per directory operation")
                .namespace("tas_directory")
                .buckets(vec![0.0, 1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0]),
            &["operation"],
        )?;
        registry.register(Box::new(users_returned.clone()))?;

        let seed_runs = CounterVec::new(
            Opts::new("seed_runs_total", "Total users initializer runs").namespace("tas"),
            &["initializer", "outcome"],
        )?;
        registry.register(Box::new(seed_runs.clone()))?;

        Ok(Self {
            queries,
            query_duration,
            users_returned,
            seed_runs,
            registry,
        })
    }

    /// Create the backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}

impl DirectoryMetrics for PrometheusMetrics {
    fn record_query(&self, operation: &str, outcome: QueryOutcome, duration_ms: u64) {
        self.queries
            .with_label_values(&[operation, outcome.as_label()])
            .inc();
        self.query_duration
            .with_label_values(&[operation])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_users_returned(&self, operation: &str, count: usize) {
        self.users_returned
            .with_label_values(&[operation])
            .observe(count as f64);
    }

    fn record_seed(&self, initializer: &str, outcome: QueryOutcome) {
        self.seed_runs
            .with_label_values(&[initializer, outcome.as_label()])
            .inc();
    }
}
