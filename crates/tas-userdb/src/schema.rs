//! Directory tables.
//!
//! - `user(id, enabled, description)`: `enabled = 1` marks an enabled user;
//! - `user_group(user_id, group_id)`;
//! - `user_skill(user_id, skill_id)`.
use rusqlite::Connection;

/// Value of `user.enabled` for enabled users.
pub const ENABLED: i32 = 1;

/// Idempotent DDL for the directory tables.
pub const CREATE_SCHEMA: &str = "
create table if not exists user (
    id          varchar(255) not null primary key,
    enabled     smallint     not null default 1,
    description varchar(255)
);
create table if not exists user_group (
    user_id  varchar(255) not null references user (id),
    group_id varchar(255) not null,
    primary key (user_id, group_id)
);
create table if not exists user_skill (
    user_id  varchar(255) not null references user (id),
    skill_id varchar(255) not null,
    primary key (user_id, skill_id)
);
";

/// Create the directory tables if they do not exist.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_SCHEMA)
}
