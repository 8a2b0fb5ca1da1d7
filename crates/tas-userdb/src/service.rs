use std::{collections::HashMap, sync::Arc, time::Instant};

use rusqlite::{Connection, Params, Row, params};
use tracing::{debug, info, instrument, trace};

use tas_core::{MetricsHandle, QueryOutcome, UserSystemError, UserSystemService, noop_metrics};
use tas_model::User;

use crate::{
    config::DbUserSystemConfig,
    datasource::{DataSource, SqliteDataSource},
    initializer::UsersInitializer,
    schema::ENABLED,
};

const FIND_ALL_USERS_QUERY: &str = "select u.id, u.enabled, g.group_id, s.skill_id from user u \
     left join user_group g on (u.id = g.user_id) \
     left join user_skill s on (u.id = s.user_id) \
     where u.enabled = ?1";

const FIND_USER_QUERY: &str = "select u.id, u.enabled, g.group_id, s.skill_id from user u \
     left join user_group g on (u.id = g.user_id) \
     left join user_skill s on (u.id = s.user_id) \
     where trim(u.id) = ?1 and u.enabled = ?2";

const OP_FIND_ALL_USERS: &str = "find all users";
const OP_FIND_USER: &str = "find user";
const OP_HEALTH_CHECK: &str = "health check";

/// User system backed by the relational directory tables.
///
/// Holds no connection between calls: every operation opens its own connection from the
/// data source located at [`UserSystemService::start`], so one instance can serve many threads.
pub struct DbUserSystemService {
    config: DbUserSystemConfig,
    initializers: Vec<Arc<dyn UsersInitializer>>,
    metrics: MetricsHandle,
    data_source: Option<Arc<dyn DataSource>>,
}

impl DbUserSystemService {
    pub const NAME: &'static str = "DBUserSystemService";

    /// Create a service; blank configuration values are replaced by defaults.
    pub fn new(config: DbUserSystemConfig) -> Self {
        Self {
            config: config.normalized(),
            initializers: Vec::new(),
            metrics: noop_metrics(),
            data_source: None,
        }
    }

    /// Make initializers available for selection by the configured name.
    pub fn with_initializers<I>(mut self, initializers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn UsersInitializer>>,
    {
        self.initializers.extend(initializers);
        self
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &DbUserSystemConfig {
        &self.config
    }

    /// Returns `true` once [`UserSystemService::start`] succeeded.
    pub fn is_started(&self) -> bool {
        self.data_source.is_some()
    }

    fn data_source(&self) -> Result<&dyn DataSource, UserSystemError> {
        self.data_source
            .as_deref()
            .ok_or(UserSystemError::NotStarted)
    }

    /// Run the configured initializer, if any.
    ///
    /// An unset name or a name no registered initializer declares is a no-op.
    fn initialize_users(&self, ds: &dyn DataSource) -> Result<(), UserSystemError> {
        let Some(name) = self.config.initializer_name() else {
            info!("no users initializer has been configured");
            return Ok(());
        };
        let Some(initializer) = self.initializers.iter().find(|i| i.name() == name) else {
            info!(initializer = name, "users initializer was not found");
            return Ok(());
        };

        info!(initializer = name, "running users initializer");
        match initializer.initialize_users(ds) {
            Ok(()) => {
                self.metrics.record_seed(name, QueryOutcome::Success);
                info!(initializer = name, "users initializer completed");
                Ok(())
            }
            Err(e) => {
                self.metrics.record_seed(name, QueryOutcome::Failure);
                Err(match e {
                    e @ UserSystemError::Initialization(_) => e,
                    other => UserSystemError::Initialization(format!("{name}: {other}")),
                })
            }
        }
    }

    /// Run an operation against the data source and record its metrics.
    fn observed<T, F, O>(&self, operation: &'static str, run: F, outcome: O) -> Result<T, UserSystemError>
    where
        F: FnOnce(&dyn DataSource) -> Result<T, UserSystemError>,
        O: Fn(&T) -> QueryOutcome,
    {
        let ds = self.data_source()?;
        let started = Instant::now();
        let res = run(ds);
        let elapsed = started.elapsed().as_millis() as u64;

        let result = match &res {
            Ok(v) => outcome(v),
            Err(_) => QueryOutcome::Failure,
        };
        self.metrics.record_query(operation, result, elapsed);
        res
    }
}

impl UserSystemService for DbUserSystemService {
    fn name(&self) -> &str {
        Self::NAME
    }

    #[instrument(level = "info", skip(self), fields(locator = %self.config.data_source))]
    fn start(&mut self) -> Result<(), UserSystemError> {
        let ds: Arc<dyn DataSource> = Arc::new(SqliteDataSource::locate(&self.config.data_source)?);
        self.initialize_users(ds.as_ref())?;
        self.data_source = Some(ds);
        info!("user system started");
        Ok(())
    }

    fn health_check(&self) -> Result<(), UserSystemError> {
        self.observed(
            OP_HEALTH_CHECK,
            |ds| {
                let check = || -> rusqlite::Result<()> {
                    let conn = ds.connection()?;
                    let mut stmt = conn.prepare(FIND_ALL_USERS_QUERY)?;
                    let mut rows = stmt.query(params![ENABLED])?;
                    rows.next()?;
                    Ok(())
                };
                check().map_err(|e| UserSystemError::query(OP_HEALTH_CHECK, e))
            },
            |_| QueryOutcome::Success,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn find_all_users(&self) -> Result<Vec<User>, UserSystemError> {
        let users = self.observed(
            OP_FIND_ALL_USERS,
            |ds| {
                ds.connection()
                    .and_then(|conn| query_users(&conn, FIND_ALL_USERS_QUERY, params![ENABLED]))
                    .map_err(|e| UserSystemError::query(OP_FIND_ALL_USERS, e))
            },
            |_| QueryOutcome::Success,
        )?;
        self.metrics
            .record_users_returned(OP_FIND_ALL_USERS, users.len());
        Ok(users)
    }

    #[instrument(level = "debug", skip(self))]
    fn find_user(&self, user_id: &str) -> Result<Option<User>, UserSystemError> {
        self.data_source()?;
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Ok(None);
        }

        self.observed(
            OP_FIND_USER,
            |ds| {
                ds.connection()
                    .and_then(|conn| query_users(&conn, FIND_USER_QUERY, params![user_id, ENABLED]))
                    .map(|users| users.into_iter().next())
                    .map_err(|e| UserSystemError::query_for(OP_FIND_USER, user_id, e))
            },
            |user| match user {
                Some(_) => QueryOutcome::Success,
                None => QueryOutcome::NotFound,
            },
        )
    }
}

/// Execute a directory query and fold its rows into users.
///
/// Columns: `id, enabled, group_id, skill_id`.
fn query_users<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut fold = UserFold::default();
    while let Some(row) = rows.next()? {
        fold.accept(row)?;
    }
    debug!(rows = fold.rows, users = fold.users.len(), "directory rows folded");
    Ok(fold.users)
}

/// Accumulates joined rows into one [`User`] per identifier, keeping first-seen order.
#[derive(Default)]
struct UserFold {
    index: HashMap<String, usize>,
    users: Vec<User>,
    rows: usize,
}

impl UserFold {
    fn accept(&mut self, row: &Row<'_>) -> rusqlite::Result<()> {
        self.rows += 1;
        let id: Option<String> = row.get(0)?;
        let group: Option<String> = row.get(2)?;
        let skill: Option<String> = row.get(3)?;

        let Some(user) = self.entry(id.as_deref().unwrap_or_default()) else {
            trace!("discarding directory row without user id");
            return Ok(());
        };
        if let Some(group) = group.as_deref() {
            user.add_group(group);
        }
        if let Some(skill) = skill.as_deref() {
            user.add_skill(skill);
        }
        Ok(())
    }

    fn entry(&mut self, raw_id: &str) -> Option<&mut User> {
        let id = raw_id.trim();
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                let user = User::new(id).ok()?;
                self.users.push(user);
                self.index.insert(id.to_string(), self.users.len() - 1);
                self.users.len() - 1
            }
        };
        self.users.get_mut(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::create_schema;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch(
            "insert into user values ('u1', 1, null), (' u2 ', 1, null), ('  ', 1, null), ('off', 0, null);
             insert into user_group values ('u1', 'HR'), ('u1', 'user'), ('u1', ' '), ('off', 'HR');
             insert into user_skill values ('u1', 'java'), ('u1', ' java'), ('u1', '');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn fold_merges_rows_and_drops_blank_values() {
        let conn = seeded();
        let users = query_users(&conn, FIND_ALL_USERS_QUERY, params![ENABLED]).unwrap();

        let ids: Vec<_> = users.iter().map(User::id).collect();
        assert_eq!(users.len(), 2, "got {ids:?}");
        assert!(ids.contains(&"u1") && ids.contains(&"u2"));

        let u1 = users.iter().find(|u| u.id() == "u1").unwrap();
        let groups: Vec<_> = u1.groups().iter().map(|g| g.id()).collect();
        assert_eq!(groups, vec!["HR", "user"]);
        assert_eq!(u1.skills().iter().collect::<Vec<_>>(), vec!["java"]);

        let u2 = users.iter().find(|u| u.id() == "u2").unwrap();
        assert!(u2.groups().is_empty());
        assert!(u2.skills().is_empty());
    }

    #[test]
    fn single_user_query_folds_all_rows() {
        let conn = seeded();
        let users = query_users(&conn, FIND_USER_QUERY, params!["u1", ENABLED]).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].groups().len(), 2);
        assert_eq!(users[0].skills().len(), 1);

        let disabled = query_users(&conn, FIND_USER_QUERY, params!["off", ENABLED]).unwrap();
        assert!(disabled.is_empty());
    }

    #[test]
    fn single_user_query_matches_trimmed_stored_id() {
        let conn = seeded();
        let users = query_users(&conn, FIND_USER_QUERY, params!["u2", ENABLED]).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id(), "u2");
    }

    #[test]
    fn queries_require_start() {
        let svc = DbUserSystemService::new(DbUserSystemConfig::default());
        assert!(!svc.is_started());
        assert!(matches!(svc.find_all_users(), Err(UserSystemError::NotStarted)));
        assert!(matches!(svc.find_user("u1"), Err(UserSystemError::NotStarted)));
        assert!(matches!(svc.health_check(), Err(UserSystemError::NotStarted)));
    }

    #[test]
    fn service_name_is_stable() {
        let svc = DbUserSystemService::new(DbUserSystemConfig::default());
        assert_eq!(svc.name(), "DBUserSystemService");
        assert_eq!(svc.config().data_source, crate::DEFAULT_DATA_SOURCE);
    }
}
