//! The contract between relations and database drivers.
//!
//! A driver implements [`Connector`], [`Statement`] and [`Cursor`]; execution,
//! DDL and transactions are provided on top of `prepare`/`bind`/`step`/`finalize`.

use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use crate::error::Result;
use crate::params::PlaceholderStyle;
use crate::relation::{Done, Relation, Shape};
use crate::traits::{ColumnInfo, Model, RowValues};
use crate::value::Value;
use crate::{relq_trace_query, relq_trace_tx};

/// Iterates the rows of an executing statement.
pub trait Cursor {
    /// Next row as one value per column, `None` when done.
    fn step(&mut self) -> Result<Option<Vec<Value>>>;
}

/// A prepared statement owned by one execution.
pub trait Statement {
    type Cursor<'s>: Cursor
    where
        Self: 's;

    /// Binds `value` to the placeholder at `index` (0-based).
    fn bind(&mut self, index: usize, value: &Value) -> Result<()>;

    fn query(&mut self) -> Result<Self::Cursor<'_>>;

    fn finalize(self) -> Result<()>;
}

/// Result a transaction callback hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionOutcome {
    Commit,
    Rollback,
}

/// A database connection able to run relations.
///
/// One statement is in flight at a time; share a connector across threads
/// only behind external synchronization.
pub trait Connector: Sized {
    type Statement<'c>: Statement
    where
        Self: 'c;

    /// Name used in trace events, e.g. `"sqlite.rusqlite"`.
    const DRIVER: &'static str;

    const PLACEHOLDER_STYLE: PlaceholderStyle;

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement<'_>>;

    /// DDL for one column, e.g. `"id" INTEGER PRIMARY KEY`.
    fn column_definition(&self, column: &ColumnInfo) -> String;

    /// Validates, renders, binds and runs `relation`, folding rows into its
    /// result shape. On any failure the statement is still finalized and no
    /// partial result is returned.
    fn exec<S: Shape>(&mut self, relation: &Relation<S>) -> Result<S::Output> {
        relation.validate()?;
        let style = Self::PLACEHOLDER_STYLE;
        let sql = relation.to_sql_with(style);
        let values = relation.bound_values();
        relq_trace_query!(Self::DRIVER, sql, values.len());

        let mut statement = self.prepare(&sql)?;
        let outcome = run::<_, S>(&mut statement, values, style.is_bindable());
        let finalized = statement.finalize();
        let output = outcome?;
        finalized?;
        Ok(output)
    }

    /// Creates the table for `M`, failing if it already exists.
    fn create_table<M: Model>(&mut self) -> Result<()> {
        let relation = Relation::<Done>::create_table::<M>(&self.definitions::<M>(), false);
        self.exec(&relation)
    }

    fn create_table_if_not_exists<M: Model>(&mut self) -> Result<()> {
        let relation = Relation::<Done>::create_table::<M>(&self.definitions::<M>(), true);
        self.exec(&relation)
    }

    fn drop_table<M: Model>(&mut self) -> Result<()> {
        self.exec(&Relation::<Done>::drop_table::<M>())
    }

    #[doc(hidden)]
    fn definitions<M: Model>(&self) -> Vec<String> {
        M::COLUMNS
            .iter()
            .map(|column| self.column_definition(column))
            .collect()
    }

    fn begin(&mut self) -> Result<()> {
        relq_trace_tx!("begin", Self::DRIVER);
        self.exec(&Relation::<Done>::raw("BEGIN TRANSACTION"))
    }

    fn commit(&mut self) -> Result<()> {
        relq_trace_tx!("commit", Self::DRIVER);
        self.exec(&Relation::<Done>::raw("COMMIT TRANSACTION"))
    }

    fn rollback(&mut self) -> Result<()> {
        relq_trace_tx!("rollback", Self::DRIVER);
        self.exec(&Relation::<Done>::raw("ROLLBACK TRANSACTION"))
    }

    /// Runs `f` inside `BEGIN` / `COMMIT` or `ROLLBACK`.
    ///
    /// If `begin` fails the callback is never invoked. `Ok(Commit)` commits,
    /// `Ok(Rollback)` rolls back, an error rolls back and is returned. A panic
    /// rolls back and resumes unwinding.
    fn transaction<F>(&mut self, f: F) -> Result<TransactionOutcome>
    where
        F: FnOnce(&mut Self) -> Result<TransactionOutcome>,
    {
        self.begin()?;

        let result = catch_unwind(AssertUnwindSafe(|| f(&mut *self)));

        match result {
            Ok(Ok(TransactionOutcome::Commit)) => {
                self.commit()?;
                Ok(TransactionOutcome::Commit)
            }
            Ok(Ok(TransactionOutcome::Rollback)) => {
                self.rollback()?;
                Ok(TransactionOutcome::Rollback)
            }
            Ok(Err(e)) => {
                // the callback's error wins over a failed rollback
                let _ = self.rollback();
                Err(e)
            }
            Err(panic_payload) => {
                let _ = self.rollback();
                resume_unwind(panic_payload);
            }
        }
    }
}

fn run<St: Statement, S: Shape>(
    statement: &mut St,
    values: &[Value],
    bind: bool,
) -> Result<S::Output> {
    if bind {
        for (index, value) in values.iter().enumerate() {
            statement.bind(index, value)?;
        }
    }

    let mut output = S::Output::default();
    let mut cursor = statement.query()?;
    while let Some(columns) = cursor.step()? {
        let mut row = RowValues::new(columns);
        S::accumulate(&mut output, &mut row)?;
        row.finish()?;
    }
    Ok(output)
}
