//! Relational user directory for the task-assigning host.
//!
//! Users, their group memberships and skills live in three tables
//! (`user`, `user_group`, `user_skill`, see [`schema`]). [`DbUserSystemService`] folds
//! the joined rows into one [`tas_model::User`] per identifier and can seed the tables
//! through a named [`UsersInitializer`] when it starts.
mod config;
pub use config::{
    DEFAULT_DATA_SOURCE, DbUserSystemConfig, ENV_DATA_SOURCE, ENV_USERS_INITIALIZER,
    ENV_USERS_SET_SIZE,
};

mod datasource;
pub use datasource::{DataSource, SqliteDataSource};

pub mod schema;

mod service;
pub use service::DbUserSystemService;

mod initializer;
pub use initializer::{BenchmarksUsersInitializer, UsersInitializer, default_initializers};

mod skills;
pub use skills::DbUserSkillsExtractor;
