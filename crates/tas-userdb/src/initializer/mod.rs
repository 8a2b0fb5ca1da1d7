//! Named, pluggable seeding of the directory tables.
mod benchmarks;
pub use benchmarks::BenchmarksUsersInitializer;

use std::sync::Arc;

use tas_core::UserSystemError;

use crate::{config::DbUserSystemConfig, datasource::DataSource};

/// One-shot population of the directory tables, run by the user system at start.
pub trait UsersInitializer: Send + Sync {
    /// Name the initializer is selected by.
    fn name(&self) -> &str;

    /// Populate the backing store.
    ///
    /// Failures are fatal to the user system start and should be reported as
    /// [`UserSystemError::Initialization`].
    fn initialize_users(&self, data_source: &dyn DataSource) -> Result<(), UserSystemError>;
}

/// Initializers shipped with this crate, configured from `config`.
pub fn default_initializers(config: &DbUserSystemConfig) -> Vec<Arc<dyn UsersInitializer>> {
    vec![Arc::new(BenchmarksUsersInitializer::from_config(config))]
}
