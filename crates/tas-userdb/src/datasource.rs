use std::fmt;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use tas_core::UserSystemError;

/// Factory of backing-store connections.
///
/// Every directory call asks for its own connection and drops it before returning,
/// so implementations must hand out independent connections.
pub trait DataSource: Send + Sync {
    /// Locator the data source was resolved from.
    fn locator(&self) -> &str;

    /// Open a fresh connection.
    fn connection(&self) -> rusqlite::Result<Connection>;
}

/// SQLite database located by path or `file:` URI.
#[derive(Clone)]
pub struct SqliteDataSource {
    locator: String,
}

impl SqliteDataSource {
    /// Resolve a locator to an existing SQLite database.
    ///
    /// The database is never created implicitly: a missing or unreadable database fails
    /// with [`UserSystemError::Connection`].
    pub fn locate(locator: &str) -> Result<Self, UserSystemError> {
        let ds = Self {
            locator: locator.to_string(),
        };
        let conn = ds.connection().map_err(|e| ds.connection_error(e))?;
        conn.query_row("select count(*) from sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| ds.connection_error(e))?;

        debug!(locator, "sqlite data source located");
        Ok(ds)
    }

    fn flags() -> OpenFlags {
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }

    fn connection_error(&self, e: rusqlite::Error) -> UserSystemError {
        UserSystemError::Connection {
            locator: self.locator.clone(),
            reason: e.to_string(),
        }
    }
}

impl DataSource for SqliteDataSource {
    fn locator(&self) -> &str {
        &self.locator
    }

    fn connection(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open_with_flags(&self.locator, Self::flags())?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}

impl fmt::Debug for SqliteDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDataSource")
            .field("locator", &self.locator)
            .finish()
    }
}
