use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelqError {
    /// Could not open or authenticate a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error preparing a statement
    #[error("Prepare error: {0}")]
    PrepareError(String),

    /// A value could not be bound to its placeholder
    #[error("Bind error at parameter {index}: {message}")]
    BindError { index: usize, message: String },

    /// Error executing a query or stepping through its rows
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Error mapping row data into the declared result shape
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Error with transaction
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Rendered placeholders disagree with the bound values
    #[error("Parameter count mismatch: {placeholders} placeholders, {values} values")]
    ParameterCount { placeholders: usize, values: usize },

    /// Error in query construction
    #[error("Query error: {0}")]
    Query(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    /// Postgres specific errors
    #[cfg(feature = "postgres-sync")]
    #[error("Postgres error: {0}")]
    Postgres(#[from] postgres::Error),
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, RelqError>;
