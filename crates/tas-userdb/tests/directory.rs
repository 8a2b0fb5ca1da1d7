use std::{path::PathBuf, sync::Arc};

use rusqlite::Connection;
use tempfile::TempDir;

use tas_core::{ExtractorRef, ExtractorRegistry, UserSystemError, UserSystemService};
use tas_model::{LABEL_SKILLS, User};
use tas_userdb::{DbUserSkillsExtractor, DbUserSystemConfig, DbUserSystemService, schema};

/// Temporary database with the directory schema and the given statements applied.
fn database(sql: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.sqlite");
    let conn = Connection::open(&path).unwrap();
    schema::create_schema(&conn).unwrap();
    conn.execute_batch(sql).unwrap();
    (dir, path)
}

fn started(path: &PathBuf) -> DbUserSystemService {
    let mut svc = DbUserSystemService::new(DbUserSystemConfig {
        data_source: path.to_str().unwrap().to_string(),
        ..Default::default()
    });
    svc.start().expect("service must start");
    svc
}

fn group_ids(user: &User) -> Vec<&str> {
    user.groups().iter().map(|g| g.id()).collect()
}

#[test]
fn user_with_groups_and_no_skills() {
    let (_dir, path) = database(
        "insert into user values ('u1', 1, 'first');
         insert into user_group values ('u1', 'HR'), ('u1', 'user');",
    );
    let svc = started(&path);

    let users = svc.find_all_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id(), "u1");
    assert_eq!(group_ids(&users[0]), vec!["HR", "user"]);
    assert!(users[0].skills().is_empty());
}

#[test]
fn disabled_users_are_invisible() {
    let (_dir, path) = database(
        "insert into user values ('on', 1, null), ('off', 0, null), ('two', 2, null);
         insert into user_group values ('off', 'HR');
         insert into user_skill values ('off', 'java');",
    );
    let svc = started(&path);

    let ids: Vec<_> = svc
        .find_all_users()
        .unwrap()
        .into_iter()
        .map(|u| u.id().to_string())
        .collect();
    assert_eq!(ids, vec!["on"]);

    assert!(svc.find_user("off").unwrap().is_none());
    assert!(svc.find_user("two").unwrap().is_none());
    assert!(svc.find_user("on").unwrap().is_some());
}

#[test]
fn many_association_rows_fold_into_one_user() {
    let (_dir, path) = database(
        "insert into user values ('u1', 1, null), ('u2', 1, null);
         insert into user_group values ('u1', 'HR'), ('u1', 'IT'), ('u1', 'user'), ('u1', '  ');
         insert into user_skill values ('u1', 'java'), ('u1', 'rust '), ('u1', ' rust'), ('u2', 'go');",
    );
    let svc = started(&path);

    let users = svc.find_all_users().unwrap();
    assert_eq!(users.len(), 2);

    let u1 = users.iter().find(|u| u.id() == "u1").unwrap();
    assert_eq!(group_ids(u1), vec!["HR", "IT", "user"]);
    assert_eq!(
        u1.skills().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["java", "rust"]
    );

    let single = svc.find_user("u1").unwrap().unwrap();
    assert_eq!(&single, u1);

    let u2 = svc.find_user(" u2 ").unwrap().unwrap();
    assert!(u2.groups().is_empty());
    assert_eq!(u2.skills().len(), 1);
}

#[test]
fn listed_user_with_padded_id_can_be_fetched() {
    let (_dir, path) = database(
        "insert into user values (' u2 ', 1, null);
         insert into user_group values (' u2 ', 'IT');",
    );
    let svc = started(&path);

    let listed = svc.find_all_users().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), "u2");

    for id in ["u2", " u2 "] {
        let user = svc
            .find_user(id)
            .unwrap()
            .unwrap_or_else(|| panic!("user {id:?} must be found"));
        assert_eq!(&user, &listed[0]);
        assert_eq!(group_ids(&user), vec!["IT"]);
    }
}

#[test]
fn find_user_not_found_is_not_an_error() {
    let (_dir, path) = database("insert into user values ('u1', 1, null);");
    let svc = started(&path);

    assert!(svc.find_user("nobody").unwrap().is_none());
    assert!(svc.find_user("").unwrap().is_none());
    assert!(svc.find_user("   ").unwrap().is_none());
}

#[test]
fn start_fails_for_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut svc = DbUserSystemService::new(DbUserSystemConfig {
        data_source: dir.path().join("nope.sqlite").to_str().unwrap().to_string(),
        ..Default::default()
    });

    assert!(matches!(svc.start(), Err(UserSystemError::Connection { .. })));
    assert!(!svc.is_started());
}

#[test]
fn query_errors_are_wrapped_with_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.sqlite");
    Connection::open(&path).unwrap().execute_batch("create table other (x int);").unwrap();
    let svc = started(&path);

    match svc.find_all_users() {
        Err(UserSystemError::Query {
            operation, target, ..
        }) => {
            assert_eq!(operation, "find all users");
            assert!(target.is_none());
        }
        other => panic!("expected Query error, got {other:?}"),
    }

    match svc.find_user("u1") {
        Err(UserSystemError::Query { target, .. }) => assert_eq!(target.as_deref(), Some("u1")),
        other => panic!("expected Query error, got {other:?}"),
    }

    assert!(matches!(svc.health_check(), Err(UserSystemError::Query { .. })));
}

#[test]
fn health_check_succeeds_on_valid_store() {
    let (_dir, path) = database("");
    let svc = started(&path);
    svc.health_check().unwrap();
    assert!(svc.find_all_users().unwrap().is_empty());
}

#[test]
fn concurrent_readers_get_consistent_snapshots() {
    let (_dir, path) = database(
        "insert into user values ('a', 1, null), ('b', 1, null), ('c', 0, null);
         insert into user_group values ('a', 'user'), ('b', 'user');",
    );
    let svc = started(&path);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let svc = &svc;
                s.spawn(move || {
                    if i % 2 == 0 {
                        svc.find_all_users().unwrap().len()
                    } else {
                        usize::from(svc.find_user("a").unwrap().is_some()) + 1
                    }
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 2);
        }
    });
}

#[test]
fn directory_users_feed_skill_labels() {
    let (_dir, path) = database(
        "insert into user values ('u1', 1, null);
         insert into user_skill values ('u1', 'java'), ('u1', 'sql');",
    );
    let svc = started(&path);
    let registry =
        ExtractorRegistry::with_defaults(vec![Arc::new(DbUserSkillsExtractor) as ExtractorRef])
            .unwrap();

    let user = svc.find_user("u1").unwrap().unwrap();
    let skills = registry.extract(LABEL_SKILLS, &user).unwrap();
    assert_eq!(skills.len(), 2);
    assert!(skills.contains("sql"));
}
