use compact_str::CompactString;

use crate::error::{RelqError, Result};
use crate::expressions::Condition;
use crate::relation::{Done, Modify, Operation, Raw, Records, Relation, Shape};
use crate::sql::{Chunks, SQLChunk, quote_ident, shift};
use crate::traits::{Attr, Column, ColumnInfo, Model};
use crate::value::Value;

/// `SET` targets for an update of model `M`: a single attribute or a tuple.
pub trait Assignment<M> {
    fn assign(self, out: &mut Vec<(ColumnInfo, Value)>);
}

impl<C: Column> Assignment<C::Model> for Attr<C> {
    fn assign(self, out: &mut Vec<(ColumnInfo, Value)>) {
        out.push((C::INFO, self.to_value()));
    }
}

macro_rules! impl_assignment_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<Mod, $($name: Assignment<Mod>),+> Assignment<Mod> for ($($name,)+) {
            fn assign(self, out: &mut Vec<(ColumnInfo, Value)>) {
                $(self.$idx.assign(out);)+
            }
        }
    };
}

impl_assignment_tuple!(A: 0);
impl_assignment_tuple!(A: 0, B: 1);
impl_assignment_tuple!(A: 0, B: 1, C: 2);
impl_assignment_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_assignment_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_assignment_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_assignment_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_assignment_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// One piece of a raw statement.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPart {
    Sql(CompactString),
    Value(Value),
}

impl From<&str> for RawPart {
    fn from(sql: &str) -> Self {
        RawPart::Sql(sql.into())
    }
}

impl From<String> for RawPart {
    fn from(sql: String) -> Self {
        RawPart::Sql(sql.into())
    }
}

impl From<Value> for RawPart {
    fn from(value: Value) -> Self {
        RawPart::Value(value)
    }
}

impl<C: Column> From<Attr<C>> for RawPart {
    fn from(attr: Attr<C>) -> Self {
        RawPart::Value(attr.to_value())
    }
}

impl<C: Column> From<&Attr<C>> for RawPart {
    fn from(attr: &Attr<C>) -> Self {
        RawPart::Value(attr.to_value())
    }
}

/// A hand-written statement with interleaved bound values, decoded as `S`.
/// The result accepts no further transformations.
///
/// ```ignore
/// let adults: Relation<Raw<Rows<(UserName,)>>> = raw_query([
///     RawPart::from("SELECT name FROM users WHERE age >= "),
///     RawPart::from(Value::from(18)),
/// ]);
/// ```
pub fn raw_query<S: Shape>(parts: impl IntoIterator<Item = RawPart>) -> Relation<Raw<S>> {
    let mut relation = Relation::new(Operation::Raw, String::new());
    for part in parts {
        match part {
            RawPart::Sql(sql) => relation.op_args.push(SQLChunk::Text(sql)),
            RawPart::Value(value) => {
                relation.op_args.push(SQLChunk::Bind(relation.values.len()));
                relation.values.push(value);
            }
        }
    }
    relation
}

impl Relation<Done> {
    /// `INSERT INTO "t" ("c1", ...) VALUES (...), (...)`.
    ///
    /// An auto-increment column absent from every record is left out so the
    /// database assigns it; any other absent value binds NULL.
    pub fn insert<M: Model>(records: impl IntoIterator<Item = M>) -> Self {
        let rows: Vec<Vec<Value>> = records.into_iter().map(|r| r.values()).collect();
        let included: Vec<usize> = M::COLUMNS
            .iter()
            .enumerate()
            .filter(|(index, column)| {
                !column.constraints.auto_increment
                    || rows
                        .iter()
                        .any(|row| row.get(*index).is_some_and(|v| !v.is_null()))
            })
            .map(|(index, _)| index)
            .collect();

        let names: Vec<String> = included
            .iter()
            .map(|&index| quote_ident(M::COLUMNS[index].name))
            .collect();
        let mut relation = Relation::new(
            Operation::Insert,
            format!("{} ({})", quote_ident(M::TABLE), names.join(", ")),
        );

        for (row_index, row) in rows.into_iter().enumerate() {
            let mut row = row.into_iter().map(Some).collect::<Vec<_>>();
            relation.op_args.push(SQLChunk::text(if row_index == 0 { "(" } else { ", (" }));
            for (position, &index) in included.iter().enumerate() {
                if position > 0 {
                    relation.op_args.push(SQLChunk::text(", "));
                }
                let value = row.get_mut(index).and_then(Option::take).unwrap_or_default();
                relation.op_args.push(SQLChunk::Bind(relation.values.len()));
                relation.values.push(value);
            }
            relation.op_args.push(SQLChunk::text(")"));
        }
        relation
    }

    /// `CREATE TABLE "t" (definitions)`; definitions come from the connector.
    pub fn create_table<M: Model>(definitions: &[String], if_not_exists: bool) -> Self {
        let mut relation = Relation::new(
            Operation::CreateTable { if_not_exists },
            quote_ident(M::TABLE),
        );
        relation.set_op_args_text(definitions.join(", "));
        relation
    }

    pub fn drop_table<M: Model>() -> Self {
        Self::raw(format!("DROP TABLE {}", quote_ident(M::TABLE)))
    }
}

impl<M: Model> Relation<Records<M>> {
    /// Turns the filtered relation into an `UPDATE ... SET`.
    pub fn update(self, assignments: impl Assignment<M>) -> Relation<Modify> {
        let mut targets = Vec::new();
        assignments.assign(&mut targets);
        self.into_update(targets)
    }

    /// Turns the filtered relation into a `DELETE`.
    pub fn destroy(mut self) -> Relation<Modify> {
        self.operation = Operation::Delete;
        self.op_args.clear();
        self.reshape()
    }

    fn into_update(mut self, targets: Vec<(ColumnInfo, Value)>) -> Relation<Modify> {
        let mut op_args = Chunks::with_capacity(targets.len() * 2);
        let mut values = Vec::with_capacity(targets.len() + self.values.len());
        for (index, (column, value)) in targets.into_iter().enumerate() {
            let separator = if index == 0 { "" } else { ", " };
            op_args.push(SQLChunk::text(format!(
                "{separator}{} = ",
                quote_ident(column.name)
            )));
            op_args.push(SQLChunk::Bind(index));
            values.push(value);
        }

        shift(&mut self.condition, values.len());
        values.append(&mut self.values);

        self.operation = Operation::Update;
        self.op_args = op_args;
        self.values = values;
        self.reshape()
    }
}

fn primary_key<M: Model>(record: &M) -> Result<(ColumnInfo, usize, Value)> {
    let index = M::COLUMNS
        .iter()
        .position(ColumnInfo::is_primary_key)
        .ok_or_else(|| RelqError::Query(format!("table {} has no primary key", M::TABLE)))?;
    let value = record.values().swap_remove(index);
    if value.is_null() {
        return Err(RelqError::Query(format!(
            "record of {} has no primary key value",
            M::TABLE
        )));
    }
    Ok((M::COLUMNS[index], index, value))
}

/// `UPDATE` of every non-key column, matched by primary key.
pub(crate) fn save<M: Model>(record: &M) -> Result<Relation<Modify>> {
    let (key, key_index, key_value) = primary_key(record)?;
    let targets: Vec<(ColumnInfo, Value)> = M::COLUMNS
        .iter()
        .copied()
        .zip(record.values())
        .enumerate()
        .filter(|(index, _)| *index != key_index)
        .map(|(_, target)| target)
        .collect();
    if targets.is_empty() {
        return Err(RelqError::Query(format!(
            "table {} has no columns to update",
            M::TABLE
        )));
    }
    Ok(Relation::<Records<M>>::all()
        .r#where(Condition::equals(key, key_value))
        .into_update(targets))
}

/// `DELETE` matched by primary key.
pub(crate) fn destroy<M: Model>(record: &M) -> Result<Relation<Modify>> {
    let (key, _, key_value) = primary_key(record)?;
    Ok(Relation::<Records<M>>::all()
        .r#where(Condition::equals(key, key_value))
        .destroy())
}
