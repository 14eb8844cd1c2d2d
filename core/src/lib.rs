//! Core of relq: typed relations, conditions, SQL rendering and the
//! connector contract. Drivers live in `relq-sqlite` and `relq-postgres`.

pub mod connector;
pub mod error;
pub mod expressions;
mod macros;
pub mod params;
pub mod relation;
pub mod sql;
pub mod tracing;
pub mod traits;
pub mod value;

// Re-export key types and traits
pub use connector::{Connector, Cursor, Statement, TransactionOutcome};
pub use error::{RelqError, Result};
pub use expressions::Condition;
pub use params::PlaceholderStyle;
pub use relation::{
    Aggregate, AggregateProjection, Assignment, Avg, Count, Done, Filterable, GroupBy, Grouped,
    Joined, Max, Min, Modify, Operation, Order, PlainProjection, Projection, Raw, RawPart, Records,
    Relation, Rows, Scalar, Sequence, Shape, Single, Sum, raw_query,
};
pub use sql::{Chunks, SQLChunk};
pub use traits::*;
pub use value::{Ordered, SQLKind, SQLType, Summable, Value};

pub mod prelude {
    pub use crate::connector::{Connector, TransactionOutcome};
    pub use crate::error::{RelqError, Result};
    pub use crate::expressions::conditions::*;
    pub use crate::relation::aggregate::{avg, count, max, min, sum};
    pub use crate::relation::{Order, RawPart, Relation, raw_query};
    pub use crate::traits::{Attr, Column, Model};
    pub use crate::value::Value;
    pub use crate::{model, relationship};
}
