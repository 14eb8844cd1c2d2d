#![allow(dead_code)]

use relq::prelude::*;
use relq::sqlite::SqliteConnector;

relq::model! {
    pub struct User("users") {
        pub id: UserId<i64>.primary_key.auto_increment,
        pub name: UserName<String>.not_null,
        pub age: UserAge<i32>,
    }
}

relq::model! {
    pub struct Post("posts") {
        pub id: PostId<i64>.primary_key.auto_increment,
        pub user_id: PostUserId<i64>.not_null,
        pub title: PostTitle<String>.not_null.max_length(120),
    }
}

relq::model! {
    pub struct Employee("employees") {
        pub id: EmployeeId<i64>.primary_key.auto_increment,
        pub dept: EmployeeDept<String>.not_null,
        pub salary: EmployeeSalary<i32>,
        pub active: EmployeeActive<bool>,
    }
}

relq::relationship!(Post: PostUserId => User: UserId);

pub fn user(name: &str, age: Option<i32>) -> User {
    User {
        name: Attr::new(name),
        age: Attr::from_option(age),
        ..User::default()
    }
}

pub fn post(user_id: i64, title: &str) -> Post {
    Post {
        user_id: Attr::new(user_id),
        title: Attr::new(title),
        ..Post::default()
    }
}

pub fn employee(dept: &str, salary: i32) -> Employee {
    Employee {
        dept: Attr::new(dept),
        salary: Attr::new(salary),
        active: Attr::new(true),
        ..Employee::default()
    }
}

/// In-memory database with every test table created and empty.
pub fn setup_db() -> SqliteConnector {
    let mut db = SqliteConnector::open_in_memory().expect("open in-memory database");
    db.create_table::<User>().expect("create users");
    db.create_table::<Post>().expect("create posts");
    db.create_table::<Employee>().expect("create employees");
    db
}

/// Users `user1` (30), `user2` (25), `user3` (no age), with ids 1..=3.
pub fn seed_users(db: &mut SqliteConnector) {
    db.exec(&User::insert([
        user("user1", Some(30)),
        user("user2", Some(25)),
        user("user3", None),
    ]))
    .expect("seed users");
}

/// Two Eng employees earning 100 and 200, one Sales employee earning 50.
pub fn seed_employees(db: &mut SqliteConnector) {
    db.exec(&Employee::insert([
        employee("Eng", 100),
        employee("Eng", 200),
        employee("Sales", 50),
    ]))
    .expect("seed employees");
}
