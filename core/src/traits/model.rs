use core::fmt::Debug;

use crate::error::Result;
use crate::expressions::Condition;
use crate::relation::{self, Count, Done, Modify, PlainProjection, Records, Relation, Rows, Scalar};
use crate::traits::{Column, ColumnInfo, Decode};
use crate::value::Value;

/// A record type mapped to one table.
///
/// Implemented by [`model!`](crate::model); the entry points below start a
/// [`Relation`] over the table.
pub trait Model: Sized + Clone + Default + Debug + Decode + Send + Sync + 'static {
    const TABLE: &'static str;

    /// Columns in declaration order, matching [`Model::values`].
    const COLUMNS: &'static [ColumnInfo];

    fn values(&self) -> Vec<Value>;

    fn all() -> Relation<Records<Self>> {
        Relation::<Records<Self>>::all()
    }

    fn select<P: PlainProjection>(projection: P) -> Relation<Rows<P>> {
        Self::all().select(projection)
    }

    fn pluck<C: Column>(column: C) -> Relation<Rows<C>> {
        Self::all().pluck(column)
    }

    fn r#where(condition: impl Into<Condition>) -> Relation<Records<Self>> {
        Self::all().r#where(condition)
    }

    fn count() -> Relation<Scalar<Count>> {
        Self::all().count()
    }

    fn insert(records: impl IntoIterator<Item = Self>) -> Relation<Done> {
        Relation::<Done>::insert(records)
    }

    /// Updates every non-key column of this record, matched by primary key.
    fn save(&self) -> Result<Relation<Modify>> {
        relation::mutate_save(self)
    }

    /// Deletes this record, matched by primary key.
    fn destroy(&self) -> Result<Relation<Modify>> {
        relation::mutate_destroy(self)
    }
}

/// A declared foreign-key relationship usable by joins, as
/// `(column of Self, column of O)`.
pub trait Related<O: Model>: Model {
    const JOIN: (ColumnInfo, ColumnInfo);
}
