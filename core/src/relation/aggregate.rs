//! Aggregate expressions.
//!
//! `sum` and `avg` need a [`Summable`] column, `max` and `min` an
//! [`Ordered`] one; anything else fails to compile.

use core::hash::Hash;

use crate::error::Result;
use crate::relation::select::select_list;
use crate::relation::{
    AggregateProjection, GroupBy, Grouped, Projection, Records, Relation, Scalar,
};
use crate::traits::{Column, Decode, Model, RowValues};
use crate::value::{Ordered, SQLType, Summable};

/// A single aggregate expression.
pub trait Aggregate: AggregateProjection {}

/// `count(*)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

/// `sum(column)`. NULL (no rows) decodes as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum<C>(pub C);

/// `avg(column)`, always floating point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avg<C>(pub C);

/// `max(column)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Max<C>(pub C);

/// `min(column)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Min<C>(pub C);

pub fn count() -> Count {
    Count
}

pub fn sum<C>(column: C) -> Sum<C>
where
    C: Column,
    C::Type: Summable,
{
    Sum(column)
}

pub fn avg<C>(column: C) -> Avg<C>
where
    C: Column,
    C::Type: Summable,
{
    Avg(column)
}

pub fn max<C>(column: C) -> Max<C>
where
    C: Column,
    C::Type: Ordered,
{
    Max(column)
}

pub fn min<C>(column: C) -> Min<C>
where
    C: Column,
    C::Type: Ordered,
{
    Min(column)
}

impl Projection for Count {
    type Output = u64;

    fn columns(&self, out: &mut Vec<String>) {
        out.push("count(*)".to_string());
    }

    fn decode(row: &mut RowValues) -> Result<u64> {
        u64::decode(row)
    }
}

impl<C> Projection for Sum<C>
where
    C: Column,
    C::Type: Summable,
{
    type Output = <C::Type as Summable>::Total;

    fn columns(&self, out: &mut Vec<String>) {
        out.push(format!("sum({})", C::INFO.qualified()));
    }

    fn decode(row: &mut RowValues) -> Result<Self::Output> {
        let total = <<C::Type as Summable>::Total as SQLType>::from_value(row.next_value()?)?;
        Ok(total.unwrap_or_default())
    }
}

impl<C> Projection for Avg<C>
where
    C: Column,
    C::Type: Summable,
{
    type Output = Option<f64>;

    fn columns(&self, out: &mut Vec<String>) {
        out.push(format!("avg({})", C::INFO.qualified()));
    }

    fn decode(row: &mut RowValues) -> Result<Option<f64>> {
        Option::<f64>::decode(row)
    }
}

impl<C> Projection for Max<C>
where
    C: Column,
    C::Type: Ordered,
{
    type Output = Option<C::Type>;

    fn columns(&self, out: &mut Vec<String>) {
        out.push(format!("max({})", C::INFO.qualified()));
    }

    fn decode(row: &mut RowValues) -> Result<Self::Output> {
        Option::<C::Type>::decode(row)
    }
}

impl<C> Projection for Min<C>
where
    C: Column,
    C::Type: Ordered,
{
    type Output = Option<C::Type>;

    fn columns(&self, out: &mut Vec<String>) {
        out.push(format!("min({})", C::INFO.qualified()));
    }

    fn decode(row: &mut RowValues) -> Result<Self::Output> {
        Option::<C::Type>::decode(row)
    }
}

impl AggregateProjection for Count {}
impl<C: Column> AggregateProjection for Sum<C> where C::Type: Summable {}
impl<C: Column> AggregateProjection for Avg<C> where C::Type: Summable {}
impl<C: Column> AggregateProjection for Max<C> where C::Type: Ordered {}
impl<C: Column> AggregateProjection for Min<C> where C::Type: Ordered {}

impl Aggregate for Count {}
impl<C: Column> Aggregate for Sum<C> where C::Type: Summable {}
impl<C: Column> Aggregate for Avg<C> where C::Type: Summable {}
impl<C: Column> Aggregate for Max<C> where C::Type: Ordered {}
impl<C: Column> Aggregate for Min<C> where C::Type: Ordered {}

impl<M: Model, J> Relation<Records<M, J>> {
    /// Reduces the relation to one aggregate value. An earlier `order_by` or
    /// `limit` fails validation.
    pub fn aggregate<A>(mut self, aggregate: A) -> Relation<Scalar<A>>
    where
        A: Aggregate,
        A::Output: Default,
    {
        self.options.collapse("an aggregate");
        self.set_op_args_text(select_list(None, &aggregate));
        self.reshape()
    }

    pub fn count(self) -> Relation<Scalar<Count>> {
        self.aggregate(Count)
    }

    pub fn sum<C>(self, column: C) -> Relation<Scalar<Sum<C>>>
    where
        C: Column,
        C::Type: Summable,
    {
        self.aggregate(Sum(column))
    }

    pub fn avg<C>(self, column: C) -> Relation<Scalar<Avg<C>>>
    where
        C: Column,
        C::Type: Summable,
    {
        self.aggregate(Avg(column))
    }

    pub fn max<C>(self, column: C) -> Relation<Scalar<Max<C>>>
    where
        C: Column,
        C::Type: Ordered,
    {
        self.aggregate(Max(column))
    }

    pub fn min<C>(self, column: C) -> Relation<Scalar<Min<C>>>
    where
        C: Column,
        C::Type: Ordered,
    {
        self.aggregate(Min(column))
    }
}

impl<K> Relation<GroupBy<K>>
where
    K: Column,
    K::Type: Hash + Eq,
{
    /// One aggregate per group, keyed by the group attribute.
    pub fn pluck<A: Aggregate>(self, aggregate: A) -> Relation<Grouped<K, A>> {
        self.select(aggregate)
    }

    pub fn count(self) -> Relation<Grouped<K, Count>> {
        self.pluck(Count)
    }

    pub fn sum<C>(self, column: C) -> Relation<Grouped<K, Sum<C>>>
    where
        C: Column,
        C::Type: Summable,
    {
        self.pluck(Sum(column))
    }

    pub fn avg<C>(self, column: C) -> Relation<Grouped<K, Avg<C>>>
    where
        C: Column,
        C::Type: Summable,
    {
        self.pluck(Avg(column))
    }

    pub fn max<C>(self, column: C) -> Relation<Grouped<K, Max<C>>>
    where
        C: Column,
        C::Type: Ordered,
    {
        self.pluck(Max(column))
    }

    pub fn min<C>(self, column: C) -> Relation<Grouped<K, Min<C>>>
    where
        C: Column,
        C::Type: Ordered,
    {
        self.pluck(Min(column))
    }
}
