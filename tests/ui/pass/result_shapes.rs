use relq::prelude::*;
use relq::{Done, Grouped, Modify, Records, Rows, Scalar};
use relq::{Count, Sum};

relq::model! {
    pub struct Employee("employees") {
        pub id: EmployeeId<i64>.primary_key,
        pub dept: EmployeeDept<String>,
        pub salary: EmployeeSalary<i32>,
    }
}

fn main() {
    let _: Relation<Records<Employee>> = Employee::all().limit(3);
    let _: Relation<Rows<EmployeeDept>> = Employee::pluck(EmployeeDept);
    let _: Relation<Rows<(EmployeeDept, EmployeeSalary)>> =
        Employee::select((EmployeeDept, EmployeeSalary));
    let _: Relation<Scalar<Count>> = Employee::count();
    let _: Relation<Scalar<Sum<EmployeeSalary>>> = Employee::all().sum(EmployeeSalary);
    let _: Relation<Grouped<EmployeeDept, Sum<EmployeeSalary>>> =
        Employee::all().group_by(EmployeeDept).sum(EmployeeSalary);
    let _: Relation<Modify> = Employee::all().destroy();
    let _: Relation<Done> = Employee::insert([Employee::default()]);
}
