use serde::{Deserialize, Serialize};

/// Locator used when none is configured.
pub const DEFAULT_DATA_SOURCE: &str = "example-ds.sqlite";

/// Environment variable holding the backing-store locator.
pub const ENV_DATA_SOURCE: &str = "TAS_USER_SYSTEM_DS";

/// Environment variable naming the users initializer to run at start.
pub const ENV_USERS_INITIALIZER: &str = "TAS_USERS_INITIALIZER";

/// Environment variable holding the benchmark users set size.
pub const ENV_USERS_SET_SIZE: &str = "TAS_BENCHMARK_USERS_SET_SIZE";

/// Configuration of the database user system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbUserSystemConfig {
    /// SQLite database path or `file:` URI. The database must already exist.
    pub data_source: String,
    /// Name of the users initializer to run at start; `None` or blank disables seeding.
    pub users_initializer: Option<String>,
    /// Raw users set size for the benchmark initializer.
    ///
    /// Kept unparsed: a malformed value only matters (and fails) when seeding runs.
    pub users_set_size: Option<String>,
}

impl Default for DbUserSystemConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            users_initializer: None,
            users_set_size: None,
        }
    }
}

impl DbUserSystemConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            data_source: lookup(ENV_DATA_SOURCE).unwrap_or_default(),
            users_initializer: lookup(ENV_USERS_INITIALIZER),
            users_set_size: lookup(ENV_USERS_SET_SIZE),
        }
        .normalized()
    }

    /// Apply defaults to blank values.
    pub fn normalized(mut self) -> Self {
        if self.data_source.trim().is_empty() {
            self.data_source = DEFAULT_DATA_SOURCE.to_string();
        }
        if self
            .users_initializer
            .as_deref()
            .is_some_and(|n| n.trim().is_empty())
        {
            self.users_initializer = None;
        }
        self
    }

    /// Configured initializer name, if seeding is enabled.
    pub fn initializer_name(&self) -> Option<&str> {
        self.users_initializer
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}
