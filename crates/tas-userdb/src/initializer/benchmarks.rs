use rusqlite::{Transaction, params};
use tracing::{debug, info};

use tas_core::UserSystemError;

use crate::{
    config::DbUserSystemConfig, datasource::DataSource, initializer::UsersInitializer,
    schema::ENABLED,
};

const INSERT_USER_QUERY: &str = "insert into user (id, enabled, description) values (?1, ?2, ?3)";
const INSERT_USER_GROUP_QUERY: &str = "insert into user_group (user_id, group_id) values (?1, ?2)";
const DELETE_USERS_QUERY: &str = "delete from user where id glob ?1";
const DELETE_USERS_GROUPS_QUERY: &str = "delete from user_group where user_id glob ?1";
const DELETE_USERS_SKILLS_QUERY: &str = "delete from user_skill where user_id glob ?1";

/// Group every generated user belongs to.
pub const BASE_GROUP: &str = "user";

/// Generated user prefixes and the domain group of their users.
pub const USER_PREFIXES: [(&str, &str); 3] =
    [("HR-user", "HR"), ("IT-user", "IT"), ("ENG-user", "ENG")];

/// Benchmark data generator.
///
/// Replaces every user whose id starts with one of [`USER_PREFIXES`] by `size` fresh users per
/// prefix (`HR-user1..=HR-userN`, ...), each in [`BASE_GROUP`] and its domain group.
/// The whole reset runs in one transaction, so running it twice with the same size is a no-op
/// on the final state.
#[derive(Debug, Clone, Default)]
pub struct BenchmarksUsersInitializer {
    users_set_size: Option<String>,
}

impl BenchmarksUsersInitializer {
    pub const NAME: &'static str = "BenchmarksDBUsersInitializer";

    /// Create the initializer with a raw (unparsed) users set size; `None` means zero.
    pub fn new(users_set_size: Option<String>) -> Self {
        Self { users_set_size }
    }

    pub fn from_config(config: &DbUserSystemConfig) -> Self {
        Self::new(config.users_set_size.clone())
    }

    /// Parse the configured size.
    pub fn users_set_size(&self) -> Result<u32, UserSystemError> {
        let raw = self.users_set_size.as_deref().unwrap_or("0").trim();
        raw.parse::<u32>().map_err(|e| {
            UserSystemError::Initialization(format!("users set size wasn't properly set: '{raw}': {e}"))
        })
    }

    fn reset(tx: &Transaction<'_>, size: u32) -> rusqlite::Result<()> {
        let mut delete_skills = tx.prepare(DELETE_USERS_SKILLS_QUERY)?;
        let mut delete_groups = tx.prepare(DELETE_USERS_GROUPS_QUERY)?;
        let mut delete_users = tx.prepare(DELETE_USERS_QUERY)?;
        for (prefix, _) in USER_PREFIXES {
            let pattern = format!("{prefix}*");
            let skills = delete_skills.execute(params![pattern])?;
            let groups = delete_groups.execute(params![pattern])?;
            let users = delete_users.execute(params![pattern])?;
            debug!(prefix, users, groups, skills, "previous benchmark users deleted");
        }

        let mut insert_user = tx.prepare(INSERT_USER_QUERY)?;
        let mut insert_group = tx.prepare(INSERT_USER_GROUP_QUERY)?;
        for i in 1..=size {
            for (prefix, domain_group) in USER_PREFIXES {
                let user_id = format!("{prefix}{i}");
                insert_user.execute(params![user_id, ENABLED, format!("{user_id} Description")])?;
                insert_group.execute(params![user_id, BASE_GROUP])?;
                insert_group.execute(params![user_id, domain_group])?;
            }
        }
        Ok(())
    }
}

impl UsersInitializer for BenchmarksUsersInitializer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn initialize_users(&self, data_source: &dyn DataSource) -> Result<(), UserSystemError> {
        let size = self.users_set_size()?;
        let fail = |e: rusqlite::Error| UserSystemError::Initialization(e.to_string());

        let mut conn = data_source.connection().map_err(fail)?;
        let tx = conn.transaction().map_err(fail)?;
        Self::reset(&tx, size).map_err(fail)?;
        tx.commit().map_err(fail)?;

        info!(
            size,
            prefixes = USER_PREFIXES.len(),
            "benchmark users generated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_size_means_zero() {
        assert_eq!(BenchmarksUsersInitializer::default().users_set_size().unwrap(), 0);
        assert_eq!(
            BenchmarksUsersInitializer::new(Some(" 12 ".into()))
                .users_set_size()
                .unwrap(),
            12
        );
    }

    #[test]
    fn malformed_size_is_an_initialization_error() {
        for raw in ["abc", "-1", "1.5", ""] {
            let res = BenchmarksUsersInitializer::new(Some(raw.into())).users_set_size();
            assert!(
                matches!(res, Err(UserSystemError::Initialization(_))),
                "expected Initialization error for {raw:?}, got {res:?}"
            );
        }
    }
}
