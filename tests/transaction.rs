#![cfg(feature = "rusqlite")]

mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};

use common::*;
use relq::prelude::*;
use relq::sqlite::SqliteTransactionType;

#[test]
fn rollback_discards_successful_statements() {
    let mut db = setup_db();
    seed_users(&mut db);

    let outcome = db
        .transaction(|tx| {
            tx.exec(&User::insert([user("temp", None)]))?;
            tx.exec(&User::r#where(eq(UserId, 1)).destroy())?;
            assert_eq!(tx.exec(&User::count())?, 3);
            Ok(TransactionOutcome::Rollback)
        })
        .unwrap();

    assert_eq!(outcome, TransactionOutcome::Rollback);
    assert_eq!(db.exec(&User::count()).unwrap(), 3);
    assert!(db.exec(&User::r#where(eq(UserName, "temp"))).unwrap().is_empty());
}

#[test]
fn commit_persists_changes() {
    let mut db = setup_db();

    let outcome = db
        .transaction(|tx| {
            seed_users(tx);
            Ok(TransactionOutcome::Commit)
        })
        .unwrap();

    assert_eq!(outcome, TransactionOutcome::Commit);
    assert_eq!(db.exec(&User::count()).unwrap(), 3);
}

#[test]
fn error_rolls_back_and_propagates() {
    let mut db = setup_db();

    let result = db.transaction(|tx| {
        seed_users(tx);
        tx.exec(&Relation::<relq::Done>::raw("SELECT * FROM missing_table"))?;
        Ok(TransactionOutcome::Commit)
    });

    assert!(result.is_err());
    assert_eq!(db.exec(&User::count()).unwrap(), 0);
}

#[test]
fn failed_begin_skips_callback() {
    let mut db = setup_db();
    db.begin().unwrap();

    let mut called = false;
    let result = db.transaction(|_| {
        called = true;
        Ok(TransactionOutcome::Commit)
    });

    assert!(result.is_err());
    assert!(!called);
    db.rollback().unwrap();
}

#[test]
fn panic_rolls_back_and_resumes() {
    let mut db = setup_db();

    let caught = catch_unwind(AssertUnwindSafe(|| {
        let _ = db.transaction(|tx| {
            seed_users(tx);
            panic!("boom");
        });
    }));

    assert!(caught.is_err());
    assert_eq!(db.exec(&User::count()).unwrap(), 0);
    // no transaction is left open
    db.begin().unwrap();
    db.commit().unwrap();
}

#[test]
fn explicit_transaction_type() {
    let mut db = setup_db();
    db.begin_with(SqliteTransactionType::Immediate).unwrap();
    seed_users(&mut db);
    db.rollback().unwrap();
    assert_eq!(db.exec(&User::count()).unwrap(), 0);
}
