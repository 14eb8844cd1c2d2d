#![cfg(feature = "rusqlite")]

mod common;

use common::*;
use relq::prelude::*;
use relq::sqlite::{SqliteConfig, SqliteConnector};
use relq::{Done, Raw, Rows};

#[test]
fn insert_assigns_auto_increment_keys() {
    let mut db = setup_db();
    seed_users(&mut db);

    assert_eq!(db.last_insert_rowid(), 3);
    let ids: Vec<i64> = db
        .exec(&User::pluck(UserId).order_by(UserId, Order::Asc))
        .unwrap()
        .into_iter()
        .filter_map(Attr::into_inner)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn insert_with_explicit_key() {
    let mut db = setup_db();
    let mut record = user("keyed", None);
    record.id.set(42);
    db.exec(&User::insert([record])).unwrap();

    let found = db.exec(&User::r#where(eq(UserId, 42))).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.value().map(String::as_str), Some("keyed"));
}

#[test]
fn duplicate_key_is_an_execution_error() {
    let mut db = setup_db();
    let mut record = user("a", None);
    record.id.set(1);
    db.exec(&User::insert([record.clone()])).unwrap();
    assert!(db.exec(&User::insert([record])).is_err());
}

#[test]
fn update_changes_matching_rows() {
    let mut db = setup_db();
    seed_users(&mut db);

    db.exec(
        &User::r#where(is_null(UserAge))
            .update((Attr::<UserAge>::new(50), Attr::<UserName>::new("elder"))),
    )
    .unwrap();
    let users = db.exec(&User::r#where(eq(UserAge, 50))).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name.value().map(String::as_str), Some("elder"));
}

#[test]
fn save_and_destroy_by_primary_key() {
    let mut db = setup_db();
    seed_users(&mut db);

    let mut second = db
        .exec(&User::r#where(eq(UserId, 2)))
        .unwrap()
        .pop()
        .unwrap();
    second.age.set(26);
    db.exec(&second.save().unwrap()).unwrap();
    let ages = db.exec(&User::pluck(UserAge).r#where(eq(UserId, 2))).unwrap();
    assert_eq!(ages, vec![Attr::<UserAge>::new(26)]);

    db.exec(&second.destroy().unwrap()).unwrap();
    assert_eq!(db.exec(&User::count()).unwrap(), 2);
    assert!(db.exec(&User::r#where(&second.id)).unwrap().is_empty());
}

#[test]
fn delete_with_condition() {
    let mut db = setup_db();
    seed_users(&mut db);

    db.exec(&User::r#where(lt(UserAge, 28)).destroy()).unwrap();
    assert_eq!(db.exec(&User::count()).unwrap(), 2);
    db.exec(&User::all().destroy()).unwrap();
    assert_eq!(db.exec(&User::count()).unwrap(), 0);
}

#[test]
fn raw_queries_bind_values() {
    let mut db = setup_db();
    seed_users(&mut db);

    let update: Relation<Raw<Done>> = raw_query([
        RawPart::from("UPDATE users SET age = "),
        RawPart::from(Value::from(1)),
        RawPart::from(" WHERE name = "),
        RawPart::from(Value::from("user3")),
    ]);
    db.exec(&update).unwrap();

    let names: Relation<Raw<Rows<(UserName, UserAge)>>> = raw_query([
        RawPart::from("SELECT name, age FROM users WHERE age < "),
        RawPart::from(Attr::<UserAge>::new(10)),
    ]);
    let rows = db.exec(&names).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.value().map(String::as_str), Some("user3"));
}

#[test]
fn create_and_drop_tables() {
    let mut db = SqliteConnector::open_in_memory().unwrap();
    db.create_table::<User>().unwrap();
    assert!(db.create_table::<User>().is_err());
    db.create_table_if_not_exists::<User>().unwrap();
    db.drop_table::<User>().unwrap();
    assert!(db.exec(&User::count()).is_err());
}

#[test]
fn file_database_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relq.db");

    {
        let mut db = SqliteConnector::open(SqliteConfig::new(&path)).unwrap();
        db.create_table::<User>().unwrap();
        seed_users(&mut db);
    }

    let mut db = SqliteConnector::open(SqliteConfig::new(&path).read_only()).unwrap();
    assert_eq!(db.exec(&User::count()).unwrap(), 3);
    assert!(db.exec(&User::insert([user("late", None)])).is_err());
}

#[test]
fn opening_a_missing_read_only_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = SqliteConnector::open(SqliteConfig::new(dir.path().join("none.db")).read_only());
    assert!(matches!(result, Err(RelqError::ConnectionError(_))));
}
