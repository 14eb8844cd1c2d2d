//! SQLite connector for relq, built on rusqlite.
//!
//! ```ignore
//! use relq_sqlite::SqliteConnector;
//!
//! let mut db = SqliteConnector::open_in_memory()?;
//! db.create_table::<User>()?;
//! ```

pub mod config;
#[cfg(feature = "rusqlite")]
pub mod connection;

pub use config::{OpenMode, SqliteConfig};
#[cfg(feature = "rusqlite")]
pub use connection::{SqliteConnector, SqliteCursor, SqliteStatement, SqliteTransactionType};
