//! Prometheus backend for user directory metrics.
//!
//! [`PrometheusMetrics`] implements [`tas_core::DirectoryMetrics`]; hand it to the directory
//! service and expose [`PrometheusMetrics::gather`] through whatever HTTP stack the host uses.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tas_prometheus::{PrometheusMetrics, TextEncoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: tas_core::MetricsHandle = Arc::new(metrics.clone());
//!
//! handle.record_users_returned("find all users", 3);
//! let text = TextEncoder::new().encode_to_string(&metrics.gather())?;
//! assert!(text.contains("tas_directory_users_returned"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `tas_directory_queries_total{operation, outcome}` - Counter
//! - `tas_directory_query_duration_seconds{operation}` - Histogram
//! - `tas_directory_users_returned{operation}` - Histogram
//! - `tas_seed_runs_total{initializer, outcome}` - Counter
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
