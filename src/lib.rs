//! # relq
//!
//! Compile-time typed relations over SQL databases. A relation records what
//! a query returns in its type, so only the operations valid for that shape
//! are available and `exec` hands back a value of exactly that shape.
//!
//! ## Quick Start
//!
//! ```rust
//! use relq::prelude::*;
//! use relq::sqlite::SqliteConnector;
//!
//! relq::model! {
//!     pub struct User("users") {
//!         pub id: UserId<i64>.primary_key.auto_increment,
//!         pub name: UserName<String>.not_null,
//!     }
//! }
//!
//! # fn main() -> relq::Result<()> {
//! let mut db = SqliteConnector::open_in_memory()?;
//! db.create_table::<User>()?;
//! db.exec(&User::insert([User {
//!     name: Attr::new("user1"),
//!     ..User::default()
//! }]))?;
//!
//! let names = db.exec(&User::pluck(UserName).r#where(eq(UserId, 1)))?;
//! assert_eq!(names[0].value(), Some(&"user1".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Database Support
//!
//! | Database   | Driver   | Feature Flag    |
//! |------------|----------|-----------------|
//! | SQLite     | rusqlite | `rusqlite`      |
//! | PostgreSQL | postgres | `postgres-sync` |

pub use relq_core::*;

/// SQLite connector and configuration.
#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use relq_sqlite::*;
}

/// PostgreSQL connector and configuration.
#[cfg(feature = "postgres")]
pub mod postgres {
    pub use relq_postgres::*;
}

/// Everything needed to declare models and build relations.
pub mod prelude {
    pub use relq_core::prelude::*;

    #[cfg(feature = "rusqlite")]
    pub use relq_sqlite::SqliteConnector;

    #[cfg(feature = "postgres-sync")]
    pub use relq_postgres::PostgresConnector;
}
