//! The immutable relation builder and its rendering.
//!
//! A [`Relation`] describes one statement awaiting execution. Every
//! transformation consumes the receiver and returns a new relation whose type
//! parameter tracks the [result shape](Shape):
//!
//! ```ignore
//! let names = User::all()
//!     .r#where(gt(UserAge, 30))
//!     .order_by(UserName, Order::Asc)
//!     .limit(10)
//!     .pluck(UserName);
//! assert_eq!(
//!     names.to_sql(),
//!     r#"SELECT "users"."name" FROM "users" WHERE "users"."age" > ? ORDER BY "users"."name" ASC LIMIT 10;"#
//! );
//! ```

pub mod aggregate;
mod join;
mod mutate;
mod select;
mod shape;

pub use aggregate::*;
pub use mutate::{Assignment, RawPart, raw_query};
pub(crate) use mutate::{destroy as mutate_destroy, save as mutate_save};
pub use select::*;
pub use shape::*;

use core::fmt;
use core::marker::PhantomData;
use std::fmt::Write;

use compact_str::CompactString;

use crate::connector::Connector;
use crate::error::{RelqError, Result};
use crate::expressions::Condition;
use crate::params::PlaceholderStyle;
use crate::sql::{Chunks, SQLChunk, bind_indices, shift, write_chunks};
use crate::value::Value;

/// What kind of statement a relation renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    Raw,
    CreateTable { if_not_exists: bool },
}

/// Sort direction for `order_by`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub const fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Options {
    group_by: Option<String>,
    order_by: Option<(String, Order)>,
    limit: Option<u64>,
    /// Set when ORDER BY or LIMIT was given before the rows collapse into groups
    /// or a single aggregate, where SQL would apply them afterwards.
    conflict: Option<&'static str>,
}

impl Options {
    fn is_empty(&self) -> bool {
        self.group_by.is_none()
            && self.order_by.is_none()
            && self.limit.is_none()
            && self.conflict.is_none()
    }

    fn collapse(&mut self, into: &'static str) {
        if self.order_by.is_some() || self.limit.is_some() {
            self.conflict = Some(into);
        }
    }
}

/// An immutable, composable statement with a statically known result shape.
pub struct Relation<S> {
    operation: Operation,
    op_args: Chunks,
    tables: String,
    condition: Chunks,
    compound: bool,
    options: Options,
    values: Vec<Value>,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for Relation<S> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation,
            op_args: self.op_args.clone(),
            tables: self.tables.clone(),
            condition: self.condition.clone(),
            compound: self.compound,
            options: self.options.clone(),
            values: self.values.clone(),
            _shape: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Relation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("operation", &self.operation)
            .field("sql", &self.to_sql())
            .field("values", &self.values)
            .finish()
    }
}

impl<S> Relation<S> {
    pub(crate) fn new(operation: Operation, tables: impl Into<String>) -> Self {
        Self {
            operation,
            op_args: Chunks::new(),
            tables: tables.into(),
            condition: Chunks::new(),
            compound: false,
            options: Options::default(),
            values: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Moves every part into a relation of another shape.
    pub(crate) fn reshape<T>(self) -> Relation<T> {
        Relation {
            operation: self.operation,
            op_args: self.op_args,
            tables: self.tables,
            condition: self.condition,
            compound: self.compound,
            options: self.options,
            values: self.values,
            _shape: PhantomData,
        }
    }

    pub(crate) fn set_op_args_text(&mut self, text: impl Into<CompactString>) {
        self.op_args.clear();
        self.op_args.push(SQLChunk::Text(text.into()));
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Values in the order their placeholders appear in the rendered SQL.
    pub fn bound_values(&self) -> &[Value] {
        &self.values
    }

    pub fn placeholder_count(&self) -> usize {
        bind_indices(&self.op_args)
            .chain(bind_indices(&self.condition))
            .count()
    }

    /// Renders with anonymous `?` placeholders.
    pub fn to_sql(&self) -> String {
        self.to_sql_with(PlaceholderStyle::Positional)
    }

    pub fn to_sql_with(&self, style: PlaceholderStyle) -> String {
        let mut sql = String::with_capacity(64 + self.tables.len());
        match self.operation {
            Operation::Select => {
                sql.push_str("SELECT ");
                self.write_op_args(&mut sql, style);
                sql.push_str(" FROM ");
                sql.push_str(&self.tables);
                self.write_condition(&mut sql, style);
                self.write_options(&mut sql);
            }
            Operation::Insert => {
                sql.push_str("INSERT INTO ");
                sql.push_str(&self.tables);
                sql.push_str(" VALUES ");
                self.write_op_args(&mut sql, style);
            }
            Operation::Update => {
                sql.push_str("UPDATE ");
                sql.push_str(&self.tables);
                sql.push_str(" SET ");
                self.write_op_args(&mut sql, style);
                self.write_condition(&mut sql, style);
            }
            Operation::Delete => {
                sql.push_str("DELETE FROM ");
                sql.push_str(&self.tables);
                self.write_condition(&mut sql, style);
            }
            Operation::Raw => self.write_op_args(&mut sql, style),
            Operation::CreateTable { if_not_exists } => {
                sql.push_str("CREATE TABLE ");
                if if_not_exists {
                    sql.push_str("IF NOT EXISTS ");
                }
                sql.push_str(&self.tables);
                sql.push_str(" (");
                self.write_op_args(&mut sql, style);
                sql.push(')');
            }
        }
        if !sql.trim_end().ends_with(';') {
            sql.push(';');
        }
        sql
    }

    fn write_op_args(&self, sql: &mut String, style: PlaceholderStyle) {
        write_chunks(sql, &self.op_args, style, &self.values);
    }

    fn write_condition(&self, sql: &mut String, style: PlaceholderStyle) {
        if self.condition.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        write_chunks(sql, &self.condition, style, &self.values);
    }

    fn write_options(&self, sql: &mut String) {
        if let Some(group) = &self.options.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group);
        }
        if let Some((column, order)) = &self.options.order_by {
            let _ = write!(sql, " ORDER BY {column} {}", order.keyword());
        }
        if let Some(limit) = self.options.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }
    }

    /// Checks the relation before it reaches a connector: every placeholder
    /// has a value, in order, and the operation is complete.
    pub fn validate(&self) -> Result<()> {
        match self.operation {
            Operation::Insert if self.op_args.is_empty() => {
                return Err(RelqError::Query(
                    "insert requires at least one record".to_string(),
                ));
            }
            Operation::Update | Operation::Delete if !self.options.is_empty() => {
                return Err(RelqError::Query(
                    "ORDER BY / LIMIT / GROUP BY cannot be applied to update or delete".to_string(),
                ));
            }
            Operation::Raw if !self.condition.is_empty() || !self.options.is_empty() => {
                return Err(RelqError::Query(
                    "raw SQL takes no WHERE / ORDER BY / LIMIT / GROUP BY".to_string(),
                ));
            }
            _ => {}
        }
        if let Some(into) = self.options.conflict {
            return Err(RelqError::Query(format!(
                "ORDER BY / LIMIT must come after {into}"
            )));
        }

        let mut placeholders = 0;
        for (position, index) in bind_indices(&self.op_args)
            .chain(bind_indices(&self.condition))
            .enumerate()
        {
            if index != position {
                return Err(RelqError::Query(format!(
                    "placeholder {position} refers to bound value {index}"
                )));
            }
            placeholders += 1;
        }
        if placeholders != self.values.len() {
            return Err(RelqError::ParameterCount {
                placeholders,
                values: self.values.len(),
            });
        }
        Ok(())
    }

    /// Runs the relation on `connector`.
    pub fn exec<C: Connector>(&self, connector: &mut C) -> Result<S::Output>
    where
        S: Shape,
    {
        connector.exec(self)
    }

    /// AND-combines `condition` with the current one, shifting its binds
    /// past every value already held.
    pub(crate) fn push_condition(&mut self, condition: Condition) {
        if condition.is_empty() {
            return;
        }
        let (mut chunks, values, compound) = condition.into_parts();
        shift(&mut chunks, self.values.len());

        if self.condition.is_empty() {
            self.condition = chunks;
            self.compound = compound;
        } else {
            let previous = core::mem::take(&mut self.condition);
            if self.compound {
                self.condition.push(SQLChunk::text("("));
                self.condition.extend(previous);
                self.condition.push(SQLChunk::text(")"));
            } else {
                self.condition.extend(previous);
            }
            self.condition.push(SQLChunk::text(" AND "));
            if compound {
                self.condition.push(SQLChunk::text("("));
                self.condition.extend(chunks);
                self.condition.push(SQLChunk::text(")"));
            } else {
                self.condition.extend(chunks);
            }
            self.compound = true;
        }
        self.values.extend(values);
    }
}

impl<S: Filterable> Relation<S> {
    /// Adds a filter. A bare attribute filters by equality (or `IS NULL`
    /// when absent); repeated calls are AND-combined.
    pub fn r#where(mut self, condition: impl Into<Condition>) -> Self {
        self.push_condition(condition.into());
        self
    }
}

impl Relation<Done> {
    /// A statement sent verbatim, without results.
    pub fn raw(sql: impl Into<CompactString>) -> Self {
        let mut relation = Relation::new(Operation::Raw, String::new());
        relation.set_op_args_text(sql);
        relation
    }
}
