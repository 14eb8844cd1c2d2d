//! rusqlite-backed connector.

use compact_str::{CompactString, format_compact};
use relq_core::connector::{Connector, Cursor, Statement};
use relq_core::error::{RelqError, Result};
use relq_core::params::PlaceholderStyle;
use relq_core::sql::quote_ident;
use relq_core::{ColumnInfo, Relation, SQLKind, Value, relq_trace_tx};
use rusqlite::types::{ToSqlOutput, ValueRef};

use crate::config::{OpenMode, SqliteConfig};

const DRIVER: &str = "sqlite.rusqlite";

/// SQLite transaction types
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliteTransactionType {
    #[default]
    /// A deferred transaction is the default - it does not acquire locks until needed
    Deferred,
    /// An immediate transaction acquires a RESERVED lock immediately
    Immediate,
    /// An exclusive transaction acquires an EXCLUSIVE lock immediately
    Exclusive,
}

impl SqliteTransactionType {
    const fn keyword(self) -> &'static str {
        match self {
            SqliteTransactionType::Deferred => "DEFERRED",
            SqliteTransactionType::Immediate => "IMMEDIATE",
            SqliteTransactionType::Exclusive => "EXCLUSIVE",
        }
    }
}

/// A SQLite database connection.
#[derive(Debug)]
pub struct SqliteConnector {
    conn: rusqlite::Connection,
}

impl SqliteConnector {
    /// Opens a database from a path or a [`SqliteConfig`].
    pub fn open(config: impl Into<SqliteConfig>) -> Result<Self> {
        let config = config.into();
        let conn = match config.mode {
            OpenMode::Memory => rusqlite::Connection::open_in_memory(),
            _ => rusqlite::Connection::open_with_flags(&config.path, config.flags()),
        }
        .map_err(|e| {
            RelqError::ConnectionError(format!("{}: {e}", config.path.display()))
        })?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(SqliteConfig::memory())
    }

    /// Wraps an existing rusqlite connection.
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn into_inner(self) -> rusqlite::Connection {
        self.conn
    }

    /// Version of the linked SQLite library.
    pub fn version() -> &'static str {
        rusqlite::version()
    }

    /// Runs several `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        relq_core::relq_trace_query!(DRIVER, sql, 0);
        Ok(self.conn.execute_batch(sql)?)
    }

    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// `BEGIN DEFERRED|IMMEDIATE|EXCLUSIVE TRANSACTION`
    pub fn begin_with(&mut self, behavior: SqliteTransactionType) -> Result<()> {
        relq_trace_tx!("begin", DRIVER);
        let sql = format_compact!("BEGIN {} TRANSACTION", behavior.keyword());
        self.exec(&Relation::<relq_core::Done>::raw(sql))
    }
}

/// A prepared rusqlite statement.
pub struct SqliteStatement<'c> {
    inner: rusqlite::Statement<'c>,
}

/// Rows of an executing [`SqliteStatement`].
pub struct SqliteCursor<'s> {
    rows: rusqlite::Rows<'s>,
    columns: usize,
}

fn to_sqlite(value: &Value) -> ToSqlOutput<'_> {
    match value {
        Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
        Value::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
        Value::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
        Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        Value::Boolean(b) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*b))),
    }
}

fn from_sqlite(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(bytes) => Value::Text(
            std::str::from_utf8(bytes)
                .map_err(|e| RelqError::Mapping(format!("invalid UTF-8 in text column: {e}")))?
                .to_string(),
        ),
        ValueRef::Blob(_) => {
            return Err(RelqError::Mapping(
                "blob columns are not supported".to_string(),
            ));
        }
    })
}

impl Cursor for SqliteCursor<'_> {
    fn step(&mut self) -> Result<Option<Vec<Value>>> {
        let Some(row) = self
            .rows
            .next()
            .map_err(|e| RelqError::ExecutionError(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut values = Vec::with_capacity(self.columns);
        for index in 0..self.columns {
            let value = row
                .get_ref(index)
                .map_err(|e| RelqError::Mapping(e.to_string()))?;
            values.push(from_sqlite(value)?);
        }
        Ok(Some(values))
    }
}

impl<'c> Statement for SqliteStatement<'c> {
    type Cursor<'s>
        = SqliteCursor<'s>
    where
        Self: 's;

    fn bind(&mut self, index: usize, value: &Value) -> Result<()> {
        self.inner
            .raw_bind_parameter(index + 1, to_sqlite(value))
            .map_err(|e| RelqError::BindError {
                index,
                message: e.to_string(),
            })
    }

    fn query(&mut self) -> Result<SqliteCursor<'_>> {
        let columns = self.inner.column_count();
        Ok(SqliteCursor {
            rows: self.inner.raw_query(),
            columns,
        })
    }

    fn finalize(self) -> Result<()> {
        self.inner
            .finalize()
            .map_err(|e| RelqError::ExecutionError(e.to_string()))
    }
}

impl Connector for SqliteConnector {
    type Statement<'c> = SqliteStatement<'c>;

    const DRIVER: &'static str = DRIVER;
    const PLACEHOLDER_STYLE: PlaceholderStyle = PlaceholderStyle::Positional;

    fn prepare(&mut self, sql: &str) -> Result<SqliteStatement<'_>> {
        let inner = self
            .conn
            .prepare(sql)
            .map_err(|e| RelqError::PrepareError(e.to_string()))?;
        Ok(SqliteStatement { inner })
    }

    fn column_definition(&self, column: &ColumnInfo) -> String {
        column_definition(column).into()
    }
}

fn column_definition(column: &ColumnInfo) -> CompactString {
    let ty = match column.kind {
        SQLKind::Integer | SQLKind::BigInt => "INTEGER",
        SQLKind::Real => "REAL",
        SQLKind::Text => "TEXT",
        SQLKind::Boolean => "BOOLEAN",
    };
    let constraints = column.constraints;
    let mut definition = match (column.kind, constraints.max_length) {
        (SQLKind::Text, Some(length)) => {
            format_compact!("{} VARCHAR({length})", quote_ident(column.name))
        }
        _ => format_compact!("{} {ty}", quote_ident(column.name)),
    };
    if constraints.primary_key {
        definition.push_str(" PRIMARY KEY");
        if constraints.auto_increment {
            definition.push_str(" AUTOINCREMENT");
        }
    } else if constraints.not_null {
        definition.push_str(" NOT NULL");
    }
    if constraints.unique {
        definition.push_str(" UNIQUE");
    }
    definition
}
