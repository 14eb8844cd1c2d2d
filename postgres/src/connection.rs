//! Synchronous PostgreSQL connector built on the `postgres` crate.

use bytes::BytesMut;
use postgres::types::ToSql;
use postgres::{Client, NoTls};
use relq_core::connector::{Connector, Cursor, Statement};
use relq_core::error::{RelqError, Result};
use relq_core::params::PlaceholderStyle;
use relq_core::sql::quote_ident;
use relq_core::{ColumnInfo, Model, SQLKind, Value};

use crate::config::PostgresConfig;
use crate::values::{PgValue, column_value};

/// A PostgreSQL connection.
pub struct PostgresConnector {
    client: Client,
}

impl PostgresConnector {
    pub fn connect(config: &PostgresConfig) -> Result<Self> {
        Self::connect_str(&config.to_connection_string())
    }

    /// Connects with a libpq key/value string or a `postgresql://` URL.
    pub fn connect_str(params: &str) -> Result<Self> {
        let client = Client::connect(params, NoTls)
            .map_err(|e| RelqError::ConnectionError(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&mut self) -> &mut Client {
        &mut self.client
    }

    pub fn into_inner(self) -> Client {
        self.client
    }

    pub fn server_version(&mut self) -> Result<String> {
        let row = self.client.query_one("SHOW server_version", &[])?;
        Ok(row.try_get(0)?)
    }

    /// Whether the table of `M` exists in the current search path.
    pub fn exists_table<M: Model>(&mut self) -> Result<bool> {
        let row = self.client.query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = ANY (current_schemas(false)) AND table_name = $1)",
            &[&M::TABLE],
        )?;
        Ok(row.try_get(0)?)
    }
}

/// A prepared statement and the values bound to it so far.
pub struct PostgresStatement<'c> {
    client: &'c mut Client,
    statement: postgres::Statement,
    params: Vec<Value>,
}

/// Rows returned by a [`PostgresStatement`].
pub struct PostgresCursor {
    rows: std::vec::IntoIter<postgres::Row>,
}

impl Cursor for PostgresCursor {
    fn step(&mut self) -> Result<Option<Vec<Value>>> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };
        (0..row.len())
            .map(|index| column_value(&row, index))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

impl Statement for PostgresStatement<'_> {
    type Cursor<'s>
        = PostgresCursor
    where
        Self: 's;

    fn bind(&mut self, index: usize, value: &Value) -> Result<()> {
        let ty = self
            .statement
            .params()
            .get(index)
            .ok_or_else(|| RelqError::BindError {
                index,
                message: format!(
                    "statement has {} parameters",
                    self.statement.params().len()
                ),
            })?;
        // Encode once up front so type mismatches surface as bind errors.
        PgValue(value)
            .to_sql(ty, &mut BytesMut::new())
            .map_err(|e| RelqError::BindError {
                index,
                message: e.to_string(),
            })?;

        if self.params.len() <= index {
            self.params.resize(index + 1, Value::Null);
        }
        self.params[index] = value.clone();
        Ok(())
    }

    fn query(&mut self) -> Result<PostgresCursor> {
        let wrapped: Vec<PgValue<'_>> = self.params.iter().map(PgValue).collect();
        let refs: Vec<&(dyn ToSql + Sync)> = wrapped
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect();
        let rows = self
            .client
            .query(&self.statement, &refs[..])
            .map_err(|e| RelqError::ExecutionError(e.to_string()))?;
        Ok(PostgresCursor {
            rows: rows.into_iter(),
        })
    }

    fn finalize(self) -> Result<()> {
        Ok(())
    }
}

impl Connector for PostgresConnector {
    type Statement<'c> = PostgresStatement<'c>;

    const DRIVER: &'static str = "postgres.sync";
    const PLACEHOLDER_STYLE: PlaceholderStyle = PlaceholderStyle::Numbered;

    fn prepare(&mut self, sql: &str) -> Result<PostgresStatement<'_>> {
        let statement = self
            .client
            .prepare(sql)
            .map_err(|e| RelqError::PrepareError(e.to_string()))?;
        Ok(PostgresStatement {
            client: &mut self.client,
            statement,
            params: Vec::new(),
        })
    }

    fn column_definition(&self, column: &ColumnInfo) -> String {
        column_definition(column)
    }
}

fn column_definition(column: &ColumnInfo) -> String {
    let constraints = column.constraints;
    let ty = match (column.kind, constraints.auto_increment) {
        (SQLKind::Integer, true) => "SERIAL",
        (SQLKind::BigInt, true) => "BIGSERIAL",
        (SQLKind::Integer, false) => "INTEGER",
        (SQLKind::BigInt, false) => "BIGINT",
        (SQLKind::Real, _) => "DOUBLE PRECISION",
        (SQLKind::Text, _) => "TEXT",
        (SQLKind::Boolean, _) => "BOOLEAN",
    };
    let mut definition = match (column.kind, constraints.max_length) {
        (SQLKind::Text, Some(length)) => {
            format!("{} VARCHAR({length})", quote_ident(column.name))
        }
        _ => format!("{} {ty}", quote_ident(column.name)),
    };
    if constraints.primary_key {
        definition.push_str(" PRIMARY KEY");
    } else if constraints.not_null {
        definition.push_str(" NOT NULL");
    }
    if constraints.unique {
        definition.push_str(" UNIQUE");
    }
    definition
}
