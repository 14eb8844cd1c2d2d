#![cfg(feature = "rusqlite")]

mod common;

use common::*;
use relq::prelude::*;

#[test]
fn pluck_where_returns_matching_names() {
    let mut db = setup_db();
    seed_users(&mut db);

    let names = db
        .exec(&User::all().select(UserName).r#where(eq(UserId, 1)))
        .unwrap();
    assert_eq!(names, vec![Attr::<UserName>::new("user1")]);
}

#[test]
fn limit_zero_returns_nothing() {
    let mut db = setup_db();
    seed_users(&mut db);

    let relation = User::all().limit(0);
    assert!(relation.to_sql().ends_with(" LIMIT 0;"));
    assert!(db.exec(&relation).unwrap().is_empty());
}

#[test]
fn full_records_round_trip_nulls() {
    let mut db = setup_db();
    seed_users(&mut db);

    let users = db
        .exec(&User::all().order_by(UserId, Order::Asc))
        .unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].id.value(), Some(&1));
    assert_eq!(users[0].name.value().map(String::as_str), Some("user1"));
    assert_eq!(users[0].age.value(), Some(&30));
    assert!(!users[2].age.is_present());
}

#[test]
fn tuple_projection_keeps_column_order() {
    let mut db = setup_db();
    seed_users(&mut db);

    let rows = User::all()
        .r#where(is_not_null(UserAge))
        .order_by(UserAge, Order::Desc)
        .select((UserName, UserAge))
        .exec(&mut db)
        .unwrap();
    let rows: Vec<(String, i32)> = rows
        .into_iter()
        .map(|(name, age)| (name.into_inner().unwrap(), age.into_inner().unwrap()))
        .collect();
    assert_eq!(
        rows,
        vec![("user1".to_string(), 30), ("user2".to_string(), 25)]
    );
}

#[test]
fn conditions_filter_rows() {
    let mut db = setup_db();
    seed_users(&mut db);

    let names = |condition: Condition, db: &mut relq::sqlite::SqliteConnector| {
        let mut names: Vec<String> = db
            .exec(&User::pluck(UserName).r#where(condition))
            .unwrap()
            .into_iter()
            .filter_map(Attr::into_inner)
            .collect();
        names.sort();
        names
    };

    assert_eq!(names(like(UserName, "user%"), &mut db).len(), 3);
    assert_eq!(names(is_null(UserAge), &mut db), vec!["user3"]);
    assert_eq!(
        names(in_array(UserId, [1, 3]), &mut db),
        vec!["user1", "user3"]
    );
    assert!(names(in_array(UserId, Vec::<i64>::new()), &mut db).is_empty());
    assert_eq!(names(between(UserAge, 26, 40), &mut db), vec!["user1"]);
    assert_eq!(
        names(not(eq(UserName, "user2")), &mut db),
        vec!["user1", "user3"]
    );
    assert_eq!(
        names(eq(UserName, "user2") | gt(UserAge, 29), &mut db),
        vec!["user1", "user2"]
    );
}

#[test]
fn injection_attempt_is_a_plain_value() {
    let mut db = setup_db();
    seed_users(&mut db);

    let hostile = "x'; DROP TABLE users; --";
    let found = db.exec(&User::r#where(eq(UserName, hostile))).unwrap();
    assert!(found.is_empty());
    assert_eq!(db.exec(&User::count()).unwrap(), 3);
}

#[test]
fn relation_is_reusable_after_exec() {
    let mut db = setup_db();
    seed_users(&mut db);

    let relation = User::pluck(UserName).r#where(gt(UserAge, 26));
    let first = relation.exec(&mut db).unwrap();
    let second = relation.exec(&mut db).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn shape_mismatch_is_a_mapping_error() {
    let mut db = setup_db();
    seed_users(&mut db);

    let relation: Relation<relq::Raw<relq::Rows<UserName>>> =
        raw_query([RawPart::from("SELECT name, age FROM users")]);
    assert!(matches!(db.exec(&relation), Err(RelqError::Mapping(_))));
}
