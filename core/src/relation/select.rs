use core::hash::Hash;

use crate::error::Result;
use crate::relation::{GroupBy, Grouped, Operation, Order, Records, Relation, Rows, Sequence};
use crate::sql::quote_ident;
use crate::traits::{Attr, Column, Decode, Model, RowValues};

/// Something that can appear in a SELECT list and be decoded back.
pub trait Projection {
    type Output;

    /// Pushes the rendered expressions, in select-list order.
    fn columns(&self, out: &mut Vec<String>);

    fn decode(row: &mut RowValues) -> Result<Self::Output>;
}

/// Plain columns and tuples of them.
pub trait PlainProjection: Projection {}

/// Aggregate expressions and tuples of them.
pub trait AggregateProjection: Projection {}

impl<C: Column> Projection for C {
    type Output = Attr<C>;

    fn columns(&self, out: &mut Vec<String>) {
        out.push(C::INFO.qualified());
    }

    fn decode(row: &mut RowValues) -> Result<Attr<C>> {
        Attr::decode(row)
    }
}

impl<C: Column> PlainProjection for C {}

macro_rules! impl_projection_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Projection),+> Projection for ($($name,)+) {
            type Output = ($($name::Output,)+);

            fn columns(&self, out: &mut Vec<String>) {
                $(self.$idx.columns(out);)+
            }

            fn decode(row: &mut RowValues) -> Result<Self::Output> {
                Ok(($($name::decode(row)?,)+))
            }
        }

        impl<$($name: PlainProjection),+> PlainProjection for ($($name,)+) {}
        impl<$($name: AggregateProjection),+> AggregateProjection for ($($name,)+) {}
    };
}

impl_projection_tuple!(A: 0);
impl_projection_tuple!(A: 0, B: 1);
impl_projection_tuple!(A: 0, B: 1, C: 2);
impl_projection_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_projection_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_projection_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_projection_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_projection_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

pub(crate) fn select_list(key: Option<String>, projection: &impl Projection) -> String {
    let mut columns = Vec::with_capacity(4);
    columns.extend(key);
    projection.columns(&mut columns);
    columns.join(", ")
}

impl<M: Model> Relation<Records<M>> {
    /// Every column of every row of `M`.
    pub fn all() -> Self {
        let mut relation = Relation::new(Operation::Select, quote_ident(M::TABLE));
        let columns: Vec<String> = M::COLUMNS.iter().map(|c| c.qualified()).collect();
        relation.set_op_args_text(columns.join(", "));
        relation
    }
}

impl<M: Model, J> Relation<Records<M, J>> {
    /// Projects columns; a single column yields bare attributes, a tuple
    /// yields tuples.
    pub fn select<P: PlainProjection>(mut self, projection: P) -> Relation<Rows<P>> {
        self.set_op_args_text(select_list(None, &projection));
        self.reshape()
    }

    /// Projects exactly one column.
    pub fn pluck<C: Column>(self, column: C) -> Relation<Rows<C>> {
        self.select(column)
    }

    /// Groups by `key`. The grouped relation must be projected onto
    /// aggregates before it can run. An earlier `order_by` or `limit` fails
    /// validation.
    pub fn group_by<K>(mut self, _key: K) -> Relation<GroupBy<K>>
    where
        K: Column,
        K::Type: Hash + Eq,
    {
        self.options.collapse("GROUP BY");
        self.options.group_by = Some(K::INFO.qualified());
        self.reshape()
    }
}

impl<S: Sequence> Relation<S> {
    /// Sorts by `column`. Calling it again replaces the previous ordering.
    pub fn order_by<C: Column>(mut self, _column: C, order: Order) -> Self {
        self.options.order_by = Some((C::INFO.qualified(), order));
        self
    }

    /// Caps the number of rows.
    pub fn limit(mut self, count: u64) -> Self {
        self.options.limit = Some(count);
        self
    }
}

impl<K> Relation<GroupBy<K>>
where
    K: Column,
    K::Type: Hash + Eq,
{
    /// Projects aggregates per group, keyed by the group attribute.
    pub fn select<P: AggregateProjection>(mut self, projection: P) -> Relation<Grouped<K, P>> {
        self.set_op_args_text(select_list(Some(K::INFO.qualified()), &projection));
        self.reshape()
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.options.limit = Some(count);
        self
    }
}
