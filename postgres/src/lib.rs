//! PostgreSQL connector for relq, built on the synchronous `postgres` crate.
//!
//! ```ignore
//! use relq_postgres::{PostgresConfig, PostgresConnector};
//!
//! let config = PostgresConfig::new("localhost", "app").user("app");
//! let mut db = PostgresConnector::connect(&config)?;
//! ```

pub mod config;
#[cfg(feature = "postgres-sync")]
pub mod connection;
#[cfg(feature = "postgres-sync")]
mod values;

pub use config::PostgresConfig;
#[cfg(feature = "postgres-sync")]
pub use connection::{PostgresConnector, PostgresCursor, PostgresStatement};
