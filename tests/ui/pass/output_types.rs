use relq::prelude::*;
use relq::sqlite::SqliteConnector;

relq::model! {
    pub struct Employee("employees") {
        pub id: EmployeeId<i64>.primary_key,
        pub dept: EmployeeDept<String>,
        pub salary: EmployeeSalary<i32>,
    }
}

fn outputs(db: &mut SqliteConnector) -> relq::Result<()> {
    let _: Vec<Employee> = db.exec(&Employee::all())?;
    let _: Vec<Attr<EmployeeDept>> = db.exec(&Employee::pluck(EmployeeDept))?;
    let _: Vec<(Attr<EmployeeDept>, Attr<EmployeeSalary>)> =
        db.exec(&Employee::select((EmployeeDept, EmployeeSalary)))?;
    let _: u64 = db.exec(&Employee::count())?;
    let _: i64 = db.exec(&Employee::all().sum(EmployeeSalary))?;
    let _: Option<f64> = db.exec(&Employee::all().avg(EmployeeSalary))?;
    let _: Option<String> = db.exec(&Employee::all().max(EmployeeDept))?;
    let _: hashbrown::HashMap<Attr<EmployeeDept>, u64> =
        db.exec(&Employee::all().group_by(EmployeeDept).count())?;
    db.exec(&Employee::all().destroy())?;
    Ok(())
}

fn main() {
    let _ = outputs;
}
