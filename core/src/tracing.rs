//! Tracing hooks for query and transaction observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate. The
//! feature is evaluated here rather than at the call site, so driver crates
//! can use the macros without declaring a `tracing` feature of their own.

/// Emit a debug-level tracing event with the driver, SQL text and parameter count.
///
/// ```ignore
/// relq_trace_query!("sqlite.rusqlite", &sql, values.len());
/// ```
#[macro_export]
macro_rules! relq_trace_query {
    ($driver:expr, $sql:expr, $param_count:expr) => {
        $crate::tracing::query($driver, &$sql, $param_count)
    };
}

/// Emit an info-level tracing event for transaction lifecycle (begin, commit, rollback).
///
/// ```ignore
/// relq_trace_tx!("begin", "postgres.sync");
/// ```
#[macro_export]
macro_rules! relq_trace_tx {
    ($event:literal, $driver:expr) => {
        $crate::tracing::transaction($event, $driver)
    };
}

#[doc(hidden)]
#[inline]
pub fn query(driver: &str, sql: &str, params: usize) {
    #[cfg(feature = "tracing")]
    ::tracing::debug!(driver, sql = %sql, params, "relq.query");
    #[cfg(not(feature = "tracing"))]
    let _ = (driver, sql, params);
}

#[doc(hidden)]
#[inline]
pub fn transaction(event: &'static str, driver: &str) {
    #[cfg(feature = "tracing")]
    ::tracing::info!(event, driver, "relq.transaction");
    #[cfg(not(feature = "tracing"))]
    let _ = (event, driver);
}
