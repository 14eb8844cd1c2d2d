//! Predicate fragments and the functions that build them.
//!
//! ```ignore
//! use relq::prelude::*;
//!
//! let adults = and([gte(UserAge, 18), like(UserName, "a%")]);
//! let rel = User::all().r#where(adults | is_null(UserAge));
//! ```

use core::ops::{BitAnd, BitOr};

use compact_str::CompactString;
use smallvec::smallvec;

use crate::params::PlaceholderStyle;
use crate::sql::{Chunks, SQLChunk, bind_indices, shift, write_chunks};
use crate::traits::{Attr, Column, ColumnInfo};
use crate::value::{SQLType, Value};

/// A boolean predicate: literal tokens, bind tokens, and the values the binds
/// refer to. Bind indices are local to the fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    chunks: Chunks,
    values: Vec<Value>,
    compound: bool,
}

impl Condition {
    /// Literal SQL with no bound values.
    pub fn raw(sql: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Text(sql.into())],
            values: Vec::new(),
            compound: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// True for AND/OR combinations.
    pub fn is_compound(&self) -> bool {
        self.compound
    }

    pub fn chunks(&self) -> &[SQLChunk] {
        &self.chunks
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Renders with `?` placeholders.
    pub fn to_sql(&self) -> String {
        self.to_sql_with(PlaceholderStyle::Positional)
    }

    pub fn to_sql_with(&self, style: PlaceholderStyle) -> String {
        let mut sql = String::new();
        write_chunks(&mut sql, &self.chunks, style, &self.values);
        sql
    }

    pub fn and(self, other: impl Into<Condition>) -> Self {
        self.combine(other.into(), " AND ")
    }

    pub fn or(self, other: impl Into<Condition>) -> Self {
        self.combine(other.into(), " OR ")
    }

    /// `NOT (...)`
    pub fn not(self) -> Self {
        if self.is_empty() {
            return self;
        }
        let mut chunks = Chunks::with_capacity(self.chunks.len() + 2);
        chunks.push(SQLChunk::text("NOT ("));
        chunks.extend(self.chunks);
        chunks.push(SQLChunk::text(")"));
        Self {
            chunks,
            values: self.values,
            compound: false,
        }
    }

    fn combine(self, other: Condition, conjunction: &'static str) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }

        let offset = self.values.len();
        let mut chunks = Chunks::with_capacity(self.chunks.len() + other.chunks.len() + 5);
        push_side(&mut chunks, self.chunks, self.compound, 0);
        chunks.push(SQLChunk::text(conjunction));
        push_side(&mut chunks, other.chunks, other.compound, offset);

        let mut values = self.values;
        values.extend(other.values);

        Self {
            chunks,
            values,
            compound: true,
        }
    }

    pub(crate) fn into_parts(self) -> (Chunks, Vec<Value>, bool) {
        (self.chunks, self.values, self.compound)
    }

    pub(crate) fn compare(column: ColumnInfo, operator: &str, value: Value) -> Self {
        Self {
            chunks: smallvec![
                SQLChunk::text(format!("{} {operator} ", column.qualified())),
                SQLChunk::Bind(0),
            ],
            values: vec![value],
            compound: false,
        }
    }

    /// Equality that renders `IS NULL` for an absent value.
    pub(crate) fn equals(column: ColumnInfo, value: Value) -> Self {
        if value.is_null() {
            Self::postfix(column, "IS NULL")
        } else {
            Self::compare(column, "=", value)
        }
    }

    fn postfix(column: ColumnInfo, operator: &str) -> Self {
        Self::raw(format!("{} {operator}", column.qualified()))
    }

    fn membership<T, I>(column: ColumnInfo, operator: &str, values: I) -> Self
    where
        T: SQLType,
        I: IntoIterator<Item = T>,
    {
        let values: Vec<Value> = values.into_iter().map(|v| v.to_value()).collect();
        if values.is_empty() {
            return Self::raw(format!(
                "{} {operator} (SELECT NULL WHERE 1=0)",
                column.qualified()
            ));
        }

        let mut chunks = Chunks::with_capacity(values.len() * 2 + 1);
        chunks.push(SQLChunk::text(format!("{} {operator} (", column.qualified())));
        for index in 0..values.len() {
            if index > 0 {
                chunks.push(SQLChunk::text(", "));
            }
            chunks.push(SQLChunk::Bind(index));
        }
        chunks.push(SQLChunk::text(")"));
        Self {
            chunks,
            values,
            compound: false,
        }
    }

    pub(crate) fn placeholder_count(&self) -> usize {
        bind_indices(&self.chunks).count()
    }
}

fn push_side(out: &mut Chunks, mut chunks: Chunks, compound: bool, offset: usize) {
    shift(&mut chunks, offset);
    if compound {
        out.push(SQLChunk::text("("));
        out.extend(chunks);
        out.push(SQLChunk::text(")"));
    } else {
        out.extend(chunks);
    }
}

impl<C: Column> From<Attr<C>> for Condition {
    fn from(attr: Attr<C>) -> Self {
        Condition::equals(C::INFO, attr.to_value())
    }
}

impl<C: Column> From<&Attr<C>> for Condition {
    fn from(attr: &Attr<C>) -> Self {
        Condition::equals(C::INFO, attr.to_value())
    }
}

impl<R: Into<Condition>> BitAnd<R> for Condition {
    type Output = Condition;

    fn bitand(self, rhs: R) -> Condition {
        self.and(rhs)
    }
}

impl<R: Into<Condition>> BitOr<R> for Condition {
    type Output = Condition;

    fn bitor(self, rhs: R) -> Condition {
        self.or(rhs)
    }
}

/// `column = value`
pub fn eq<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, "=", value.into().to_value())
}

/// `column <> value`
pub fn neq<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, "<>", value.into().to_value())
}

/// `column < value`
pub fn lt<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, "<", value.into().to_value())
}

/// `column <= value`
pub fn lte<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, "<=", value.into().to_value())
}

/// `column > value`
pub fn gt<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, ">", value.into().to_value())
}

/// `column >= value`
pub fn gte<C: Column>(_column: C, value: impl Into<C::Type>) -> Condition {
    Condition::compare(C::INFO, ">=", value.into().to_value())
}

/// `column LIKE pattern`
pub fn like<C: Column<Type = String>>(_column: C, pattern: impl Into<String>) -> Condition {
    Condition::compare(C::INFO, "LIKE", Value::Text(pattern.into()))
}

/// `column NOT LIKE pattern`
pub fn not_like<C: Column<Type = String>>(_column: C, pattern: impl Into<String>) -> Condition {
    Condition::compare(C::INFO, "NOT LIKE", Value::Text(pattern.into()))
}

/// `column BETWEEN low AND high`
pub fn between<C: Column>(
    _column: C,
    low: impl Into<C::Type>,
    high: impl Into<C::Type>,
) -> Condition {
    Condition {
        chunks: smallvec![
            SQLChunk::text(format!("{} BETWEEN ", C::INFO.qualified())),
            SQLChunk::Bind(0),
            SQLChunk::text(" AND "),
            SQLChunk::Bind(1),
        ],
        values: vec![low.into().to_value(), high.into().to_value()],
        compound: false,
    }
}

/// `column IN (...)`. An empty list matches nothing.
pub fn in_array<C, I>(_column: C, values: I) -> Condition
where
    C: Column,
    I: IntoIterator,
    I::Item: Into<C::Type>,
{
    Condition::membership(C::INFO, "IN", values.into_iter().map(Into::<C::Type>::into))
}

/// `column NOT IN (...)`. An empty list matches every non-null value.
pub fn not_in_array<C, I>(_column: C, values: I) -> Condition
where
    C: Column,
    I: IntoIterator,
    I::Item: Into<C::Type>,
{
    Condition::membership(
        C::INFO,
        "NOT IN",
        values.into_iter().map(Into::<C::Type>::into),
    )
}

/// `column IS NULL`
pub fn is_null<C: Column>(_column: C) -> Condition {
    Condition::postfix(C::INFO, "IS NULL")
}

/// `column IS NOT NULL`
pub fn is_not_null<C: Column>(_column: C) -> Condition {
    Condition::postfix(C::INFO, "IS NOT NULL")
}

/// `left = right` between two columns of the same type.
pub fn eq_column<L, R>(_left: L, _right: R) -> Condition
where
    L: Column,
    R: Column<Type = L::Type>,
{
    Condition::raw(format!("{} = {}", L::INFO.qualified(), R::INFO.qualified()))
}

/// AND of every condition; empty input yields an empty condition.
pub fn and<I>(conditions: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Condition>,
{
    conditions
        .into_iter()
        .fold(Condition::default(), |acc, next| acc.and(next))
}

/// OR of every condition; empty input yields an empty condition.
pub fn or<I>(conditions: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Condition>,
{
    conditions
        .into_iter()
        .fold(Condition::default(), |acc, next| acc.or(next))
}

pub fn not(condition: impl Into<Condition>) -> Condition {
    condition.into().not()
}
