//! Result shapes: type-level tags describing what executing a relation yields.
//!
//! Invalid combinations are rejected by the compiler. With this model:
//!
//! ```
//! use relq_core::prelude::*;
//!
//! relq_core::model! {
//!     pub struct Employee("employees") {
//!         pub id: EmployeeId<i64>.primary_key,
//!         pub dept: EmployeeDept<String>,
//!         pub salary: EmployeeSalary<i32>,
//!     }
//! }
//!
//! let grouped = Employee::all().group_by(EmployeeDept).sum(EmployeeSalary);
//! assert!(grouped.to_sql().contains("GROUP BY"));
//! ```
//!
//! summing text fails:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! let _ = Employee::all().sum(EmployeeDept);
//! ```
//!
//! a grouped relation only projects aggregates:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! let _ = Employee::all().group_by(EmployeeDept).select(EmployeeSalary);
//! ```
//!
//! ordering is not available once grouped:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! let _ = Employee::all()
//!     .group_by(EmployeeDept)
//!     .order_by(EmployeeDept, Order::Asc);
//! ```
//!
//! a grouping without a projection cannot run:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! fn run<C: Connector>(db: &mut C) {
//!     let _ = db.exec(&Employee::all().group_by(EmployeeDept));
//! }
//! ```
//!
//! joins need a declared relationship:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! # relq_core::model! {
//! #     pub struct Team("teams") {
//! #         pub id: TeamId<i64>.primary_key,
//! #     }
//! # }
//! let _ = Employee::all().join::<Team>();
//! ```
//!
//! raw SQL is final:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! let raw = raw_query::<relq_core::Records<Employee>>([RawPart::from("SELECT * FROM employees")]);
//! let _ = raw.r#where(is_null(EmployeeSalary));
//! ```
//!
//! and an insert takes no filter:
//!
//! ```compile_fail
//! # use relq_core::prelude::*;
//! # relq_core::model! {
//! #     pub struct Employee("employees") {
//! #         pub id: EmployeeId<i64>.primary_key,
//! #         pub dept: EmployeeDept<String>,
//! #         pub salary: EmployeeSalary<i32>,
//! #     }
//! # }
//! let _ = Employee::insert([Employee::default()]).r#where(eq(EmployeeId, 1));
//! ```

use core::hash::Hash;
use core::marker::PhantomData;

use hashbrown::HashMap;

use crate::error::Result;
use crate::relation::Projection;
use crate::traits::{Attr, Column, Decode, Model, RowValues};

/// A result shape that rows can be folded into.
pub trait Shape {
    type Output: Default;

    fn accumulate(output: &mut Self::Output, row: &mut RowValues) -> Result<()>;
}

/// Shapes that are ordered sequences and accept `order_by` / `limit`.
pub trait Sequence: Shape {}

/// Shapes that accept `where`.
pub trait Filterable {}

/// Relation over a single table.
#[derive(Debug, Clone, Copy)]
pub struct Single;

/// Relation with at least one join clause.
#[derive(Debug, Clone, Copy)]
pub struct Joined;

/// Full records of `M`.
pub struct Records<M, J = Single>(PhantomData<fn() -> (M, J)>);

/// One projected row per result row.
pub struct Rows<P>(PhantomData<fn() -> P>);

/// A single value; the last row wins and zero rows give the default.
pub struct Scalar<P>(PhantomData<fn() -> P>);

/// A relation grouped by `K` that has not yet been projected. Not executable.
pub struct GroupBy<K>(PhantomData<fn() -> K>);

/// Group key to projected aggregate(s).
pub struct Grouped<K, P>(PhantomData<fn() -> (K, P)>);

/// Insert, raw statement or DDL; rows are ignored.
pub struct Done;

/// Hand-written SQL decoded as `S`. The text is final, so a raw relation takes
/// no further filters, projections or options.
pub struct Raw<S>(PhantomData<fn() -> S>);

/// Update or delete; filterable, rows are ignored.
pub struct Modify;

impl<M: Model, J> Shape for Records<M, J> {
    type Output = Vec<M>;

    fn accumulate(output: &mut Vec<M>, row: &mut RowValues) -> Result<()> {
        output.push(M::decode(row)?);
        Ok(())
    }
}

impl<P: Projection> Shape for Rows<P> {
    type Output = Vec<P::Output>;

    fn accumulate(output: &mut Self::Output, row: &mut RowValues) -> Result<()> {
        output.push(P::decode(row)?);
        Ok(())
    }
}

impl<P> Shape for Scalar<P>
where
    P: Projection,
    P::Output: Default,
{
    type Output = P::Output;

    fn accumulate(output: &mut Self::Output, row: &mut RowValues) -> Result<()> {
        *output = P::decode(row)?;
        Ok(())
    }
}

impl<K, P> Shape for Grouped<K, P>
where
    K: Column,
    K::Type: Hash + Eq,
    P: Projection,
{
    type Output = HashMap<Attr<K>, P::Output>;

    fn accumulate(output: &mut Self::Output, row: &mut RowValues) -> Result<()> {
        let key = Attr::<K>::decode(row)?;
        let value = P::decode(row)?;
        output.insert(key, value);
        Ok(())
    }
}

impl Shape for Done {
    type Output = ();

    fn accumulate(_output: &mut (), _row: &mut RowValues) -> Result<()> {
        Ok(())
    }
}

impl<S: Shape> Shape for Raw<S> {
    type Output = S::Output;

    fn accumulate(output: &mut Self::Output, row: &mut RowValues) -> Result<()> {
        S::accumulate(output, row)
    }
}

impl Shape for Modify {
    type Output = ();

    fn accumulate(_output: &mut (), _row: &mut RowValues) -> Result<()> {
        Ok(())
    }
}

impl<M: Model, J> Sequence for Records<M, J> {}
impl<P: Projection> Sequence for Rows<P> {}

impl<M, J> Filterable for Records<M, J> {}
impl<P> Filterable for Rows<P> {}
impl<P> Filterable for Scalar<P> {}
impl<K> Filterable for GroupBy<K> {}
impl<K, P> Filterable for Grouped<K, P> {}
impl Filterable for Modify {}
