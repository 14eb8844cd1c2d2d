//! Runs against a live server when `RELQ_POSTGRES_URL` is set, e.g.
//! `host=localhost user=postgres password=postgres dbname=relq_test`.
#![cfg(feature = "postgres-sync")]

use relq::postgres::PostgresConnector;
use relq::prelude::*;
use relq::PlaceholderStyle;

relq::model! {
    pub struct Account("relq_accounts") {
        pub id: AccountId<i64>.primary_key.auto_increment,
        pub owner: AccountOwner<String>.not_null,
        pub team: AccountTeam<String>.max_length(32),
        pub credits: AccountCredits<i32>,
        pub active: AccountActive<bool>,
    }
}

fn account(owner: &str, team: &str, credits: i32) -> Account {
    Account {
        owner: Attr::new(owner),
        team: Attr::new(team),
        credits: Attr::new(credits),
        active: Attr::new(true),
        ..Account::default()
    }
}

fn connect() -> Option<PostgresConnector> {
    let url = std::env::var("RELQ_POSTGRES_URL").ok()?;
    let mut db = PostgresConnector::connect_str(&url).expect("connect to postgres");
    if db.exists_table::<Account>().expect("check table") {
        db.drop_table::<Account>().expect("drop stale table");
    }
    db.create_table::<Account>().expect("create table");
    db.exec(&Account::insert([
        account("ada", "core", 100),
        account("bob", "core", 200),
        account("cy", "web", 50),
    ]))
    .expect("seed");
    Some(db)
}

#[test]
fn renders_numbered_placeholders() {
    let relation = Account::pluck(AccountOwner)
        .r#where(eq(AccountTeam, "core"))
        .r#where(gt(AccountCredits, 10));
    assert_eq!(
        relation.to_sql_with(PlaceholderStyle::Numbered),
        r#"SELECT "relq_accounts"."owner" FROM "relq_accounts" WHERE "relq_accounts"."team" = $1 AND "relq_accounts"."credits" > $2;"#
    );
}

// One test owns the table so parallel runs do not race on it.
#[test]
fn live_server_round_trip() {
    let Some(mut db) = connect() else {
        return;
    };
    assert!(db.server_version().unwrap().chars().next().is_some_and(|c| c.is_ascii_digit()));

    let rich = db
        .exec(
            &Account::pluck(AccountOwner)
                .r#where(gte(AccountCredits, 100))
                .order_by(AccountOwner, Order::Asc),
        )
        .unwrap();
    assert_eq!(
        rich,
        vec![Attr::<AccountOwner>::new("ada"), Attr::<AccountOwner>::new("bob")]
    );

    let totals = db
        .exec(&Account::all().group_by(AccountTeam).sum(AccountCredits))
        .unwrap();
    assert_eq!(totals[&Attr::<AccountTeam>::new("core")], 300);
    assert_eq!(totals[&Attr::<AccountTeam>::new("web")], 50);

    assert_eq!(db.exec(&Account::count()).unwrap(), 3);
    let average = db.exec(&Account::all().avg(AccountCredits)).unwrap();
    assert!((average.unwrap() - 350.0 / 3.0).abs() < 1e-6);

    db.transaction(|tx| {
        tx.exec(&Account::all().destroy())?;
        Ok(TransactionOutcome::Rollback)
    })
    .unwrap();
    assert_eq!(db.exec(&Account::count()).unwrap(), 3);

    db.drop_table::<Account>().unwrap();
}
