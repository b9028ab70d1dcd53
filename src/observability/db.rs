//! Database operation instrumentation.
//!
//! # Responsibilities
//! - Provide ready-made callbacks for a driver's per-statement hook
//! - Convert operation outcomes into single log events, never errors
//!
//! # Design Decisions
//! - The hook shape `(scope, elapsed, sql, params, error)` is driver-neutral;
//!   the driver owns timing and error production, this module owns wording
//! - Message literals are stable: downstream alerting keys on them

use std::error::Error;
use std::time::Duration;

use crate::observability::context::RequestScope;
use crate::observability::logging::Logger;

/// Callback shape expected by a database driver's instrumentation hook,
/// invoked once per executed statement.
pub type DbLogFn = Box<
    dyn Fn(Option<&RequestScope>, Duration, &str, &[String], Option<&(dyn Error + 'static)>)
        + Send
        + Sync,
>;

/// Instrumentation callback for read queries.
///
/// Logs "DB query successful" at info, or "DB query error: <message>" at
/// error. The underlying error is consumed, never re-raised.
pub fn db_query(logger: &Logger) -> DbLogFn {
    statement_hook(logger.clone(), "DB query")
}

/// Instrumentation callback for mutating statements.
///
/// Logs "DB execution successful" / "DB execution error: <message>".
pub fn db_exec(logger: &Logger) -> DbLogFn {
    statement_hook(logger.clone(), "DB execution")
}

fn statement_hook(logger: Logger, operation: &'static str) -> DbLogFn {
    Box::new(move |scope, elapsed, sql, params, err| {
        let mut entry = logger
            .with_scope(scope)
            .with_field("duration_ms", elapsed.as_millis().to_string())
            .with_field("sql", sql);
        if !params.is_empty() {
            entry = entry.with_field("params", params.join(", "));
        }
        match err {
            None => entry.info(format!("{} successful", operation)),
            Some(e) => entry.error(format!("{} error: {}", operation, e)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::Level;
    use std::io;

    #[test]
    fn test_db_query_messages() {
        let (logger, entries) = Logger::for_test();
        let hook = db_query(&logger);

        hook(None, Duration::from_millis(3), "sql", &[], None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.all()[0].message, "DB query successful");
        assert_eq!(entries.all()[0].level, Level::Info);
        entries.take_all();

        let err = io::Error::new(io::ErrorKind::Other, "test");
        hook(None, Duration::from_millis(3), "sql", &[], Some(&err));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.all()[0].message, "DB query error: test");
        assert_eq!(entries.all()[0].level, Level::Error);
    }

    #[test]
    fn test_db_exec_messages() {
        let (logger, entries) = Logger::for_test();
        let hook = db_exec(&logger);

        hook(None, Duration::from_millis(3), "sql", &[], None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.all()[0].message, "DB execution successful");
        entries.take_all();

        let err = io::Error::new(io::ErrorKind::Other, "test");
        hook(None, Duration::from_millis(3), "sql", &[], Some(&err));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.all()[0].message, "DB execution error: test");
    }

    #[test]
    fn test_hook_carries_scope_and_statement_fields() {
        let (logger, entries) = Logger::for_test();
        let hook = db_query(&logger);

        let mut headers = axum::http::HeaderMap::new();
        headers.insert("x-request-id", "abc".parse().unwrap());
        let scope = RequestScope::from_headers(&headers);

        hook(
            Some(&scope),
            Duration::from_millis(7),
            "SELECT 1",
            &["limit: 10".to_string()],
            None,
        );
        let entry = &entries.take_all()[0];
        assert_eq!(entry.field("request_id"), Some("abc"));
        assert_eq!(entry.field("duration_ms"), Some("7"));
        assert_eq!(entry.field("sql"), Some("SELECT 1"));
        assert_eq!(entry.field("params"), Some("limit: 10"));
    }
}
