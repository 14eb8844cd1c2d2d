#![cfg(feature = "rusqlite")]

mod common;

use common::*;
use hashbrown::HashMap;
use relq::prelude::*;

fn dept(name: &str) -> Attr<EmployeeDept> {
    Attr::new(name)
}

#[test]
fn grouped_sum_maps_key_to_total() {
    let mut db = setup_db();
    seed_employees(&mut db);

    let totals = db
        .exec(&Employee::all().group_by(EmployeeDept).sum(EmployeeSalary))
        .unwrap();
    let expected: HashMap<_, _> = [(dept("Eng"), 300i64), (dept("Sales"), 50)]
        .into_iter()
        .collect();
    assert_eq!(totals, expected);
}

#[test]
fn grouped_select_of_several_aggregates() {
    let mut db = setup_db();
    seed_employees(&mut db);

    let stats = Employee::all()
        .group_by(EmployeeDept)
        .select((count(), max(EmployeeSalary), avg(EmployeeSalary)))
        .exec(&mut db)
        .unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[&dept("Eng")], (2, Some(200), Some(150.0)));
    assert_eq!(stats[&dept("Sales")], (1, Some(50), Some(50.0)));
}

#[test]
fn grouped_count_respects_where() {
    let mut db = setup_db();
    seed_employees(&mut db);

    let counts = db
        .exec(
            &Employee::r#where(gt(EmployeeSalary, 60))
                .group_by(EmployeeDept)
                .count(),
        )
        .unwrap();
    assert_eq!(counts.get(&dept("Eng")), Some(&2));
    assert_eq!(counts.get(&dept("Sales")), None);
}

#[test]
fn scalar_aggregates() {
    let mut db = setup_db();
    seed_employees(&mut db);

    assert_eq!(db.exec(&Employee::count()).unwrap(), 3);
    assert_eq!(db.exec(&Employee::all().sum(EmployeeSalary)).unwrap(), 350);
    assert_eq!(db.exec(&Employee::all().max(EmployeeSalary)).unwrap(), Some(200));
    assert_eq!(db.exec(&Employee::all().min(EmployeeSalary)).unwrap(), Some(50));
    assert_eq!(
        db.exec(&Employee::all().min(EmployeeDept)).unwrap(),
        Some("Eng".to_string())
    );

    let average = db.exec(&Employee::all().avg(EmployeeSalary)).unwrap();
    assert!((average.unwrap() - 350.0 / 3.0).abs() < 1e-9);
}

#[test]
fn aggregates_over_no_rows() {
    let mut db = setup_db();

    assert_eq!(db.exec(&Employee::count()).unwrap(), 0);
    assert_eq!(db.exec(&Employee::all().sum(EmployeeSalary)).unwrap(), 0);
    assert_eq!(db.exec(&Employee::all().avg(EmployeeSalary)).unwrap(), None);
    assert_eq!(db.exec(&Employee::all().max(EmployeeSalary)).unwrap(), None);
    assert!(
        db.exec(&Employee::all().group_by(EmployeeDept).count())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn grouped_limit_caps_groups() {
    let mut db = setup_db();
    seed_employees(&mut db);

    let relation = Employee::all()
        .group_by(EmployeeDept)
        .limit(1)
        .sum(EmployeeSalary);
    assert!(relation.to_sql().ends_with(r#"GROUP BY "employees"."dept" LIMIT 1;"#));
    assert_eq!(db.exec(&relation).unwrap().len(), 1);
}
